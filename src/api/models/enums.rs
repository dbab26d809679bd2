use serde::{Deserialize, Serialize};

/// Supported input field types for a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Tel,
    Number,
    Textarea,
    Select,
    Radio,
    Checkbox,
    File,
    Date,
    Time,
    Url,
}

impl FieldType {
    /// All supported type names as they appear on the wire.
    pub const SUPPORTED: [&'static str; 12] = [
        "text", "email", "tel", "number", "textarea", "select", "radio", "checkbox", "file",
        "date", "time", "url",
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "email" => Some(Self::Email),
            "tel" => Some(Self::Tel),
            "number" => Some(Self::Number),
            "textarea" => Some(Self::Textarea),
            "select" => Some(Self::Select),
            "radio" => Some(Self::Radio),
            "checkbox" => Some(Self::Checkbox),
            "file" => Some(Self::File),
            "date" => Some(Self::Date),
            "time" => Some(Self::Time),
            "url" => Some(Self::Url),
            _ => None,
        }
    }

    /// Select and radio fields must carry at least one option.
    pub fn requires_options(&self) -> bool {
        matches!(self, Self::Select | Self::Radio)
    }
}

/// Visual theme applied to a rendered form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormTheme {
    Default,
    Minimal,
    Modern,
    Classic,
    Dark,
}

impl FormTheme {
    pub const SUPPORTED: [&'static str; 5] = ["default", "minimal", "modern", "classic", "dark"];

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "default" => Some(Self::Default),
            "minimal" => Some(Self::Minimal),
            "modern" => Some(Self::Modern),
            "classic" => Some(Self::Classic),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

impl FormTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Minimal => "minimal",
            Self::Modern => "modern",
            Self::Classic => "classic",
            Self::Dark => "dark",
        }
    }
}

impl Default for FormTheme {
    fn default() -> Self {
        Self::Default
    }
}

/// Publication status of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    Draft,
    Published,
    Archived,
}

impl FormStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "published" => Some(Self::Published),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

/// Which AI pipeline operation produced a conversation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationType {
    Generate,
    Modify,
    Analyze,
}

impl ConversationType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Generate => "Generate",
            Self::Modify => "Modify",
            Self::Analyze => "Analyze",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::Modify => "modify",
            Self::Analyze => "analyze",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "generate" => Some(Self::Generate),
            "modify" => Some(Self::Modify),
            "analyze" => Some(Self::Analyze),
            _ => None,
        }
    }
}

/// Focus of a form analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    Comprehensive,
    Accessibility,
    Ux,
    Conversion,
    Seo,
}

impl AnalysisType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comprehensive => "comprehensive",
            Self::Accessibility => "accessibility",
            Self::Ux => "ux",
            Self::Conversion => "conversion",
            Self::Seo => "seo",
        }
    }
}

impl Default for AnalysisType {
    fn default() -> Self {
        Self::Comprehensive
    }
}
