use serde::{Deserialize, Serialize};

/// Languages the remote runner is asked to execute submissions in.
/// Serialized/deserialized in `lowercase` for config JSON.
/// Common aliases are accepted (e.g., "cc", "c++").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,                                  // "c"
    #[serde(alias = "cc", alias = "c++")]
    Cpp,                                // "cpp"
}

impl Language {
    /// Language identifier expected by the runner's execute endpoint.
    pub fn runner_name(self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "c++",
        }
    }

    /// File name the submission is uploaded under.
    pub fn source_file_name(self) -> &'static str {
        match self {
            Language::C => "main.c",
            Language::Cpp => "main.cpp",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::C
    }
}
