use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const ROLE: &str = "Professional marketing content writer";

const DESCRIPTION_PREAMBLE: &str =
    "Writes professional bengali content for ecommerce facebook page posts. Below are the sample writings:";

pub const INSTRUCTIONS: [&str; 7] = [
    "You will be provided a product name and a special context (Optional). Your responsibility is to write a professional content for a facebook page post.",
    "Write the content with necessary branding of the page Dakadaki zone. Our products are bird foods, bird accessories and bird toys.",
    "Use necessary emojis to make it attractive.",
    "Use psychology and necessary informations for marketing and making people interested to buy it.",
    "Use hashtags at the end.",
    "Don't add anything else or extra texts rather than the main content",
    "IMPORTANT: THE CONTENT MUST BE IN BENGALI.",
];

const MARKDOWN_NOTE: &str = "Use markdown to format your answers.";

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read sample writings from {path}: {source}")]
    Read { path: PathBuf, #[source] source: std::io::Error },
}

/// Writing persona handed to the model with every request.
///
/// Built once at startup and shared read-only between handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptProfile {
    role: String,
    description: String,
    instructions: Vec<String>,
    markdown: bool,
}

impl PromptProfile {
    /// Reads the sample writings at `path` and builds the Dakadaki Zone profile around them.
    /// Fails if the file is missing, unreadable or not UTF-8.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let samples = std::fs::read_to_string(path)
            .map_err(|source| ProfileError::Read { path: path.to_path_buf(), source })?;
        info!("📚 Loaded {} chars of sample writings from {}", samples.chars().count(), path.display());
        Ok(Self::with_samples(&samples))
    }

    pub fn with_samples(samples: &str) -> Self {
        Self {
            role: ROLE.to_string(),
            description: format!("{DESCRIPTION_PREAMBLE}\n\n{samples}"),
            instructions: INSTRUCTIONS.iter().map(|s| s.to_string()).collect(),
            markdown: true,
        }
    }

    pub fn role(&self) -> &str { &self.role }
    pub fn instructions(&self) -> &[String] { &self.instructions }

    /// Renders the profile as the system message: description, role block,
    /// bulleted instructions, then the markdown note when enabled.
    pub fn system_instruction(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.description);
        out.push_str("\n\n<your_role>\n");
        out.push_str(&self.role);
        out.push_str("\n</your_role>\n\n<instructions>\n");
        for instruction in &self.instructions {
            out.push_str("- ");
            out.push_str(instruction);
            out.push('\n');
        }
        out.push_str("</instructions>");
        if self.markdown {
            out.push_str("\n\n<additional_information>\n- ");
            out.push_str(MARKDOWN_NOTE);
            out.push_str("\n</additional_information>");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scratch_file(contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("samples-{}.txt", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn load_embeds_sample_writings_in_description() {
        let path = scratch_file("🐦 পাখির খাবার এখন হাতের নাগালে!".as_bytes());
        let profile = PromptProfile::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(profile.role(), ROLE);
        assert!(profile.description.starts_with(DESCRIPTION_PREAMBLE));
        assert!(profile.description.ends_with("\n\n🐦 পাখির খাবার এখন হাতের নাগালে!"));
        assert_eq!(profile.instructions().len(), INSTRUCTIONS.len());
        assert!(profile.markdown);
    }

    #[test]
    fn load_fails_for_missing_file() {
        let path = std::env::temp_dir().join(format!("missing-{}.txt", uuid::Uuid::new_v4()));
        let err = PromptProfile::load(&path).unwrap_err();
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn load_rejects_non_utf8_samples() {
        let path = scratch_file(&[0xff, 0xfe, 0xfd]);
        let result = PromptProfile::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ProfileError::Read { .. })));
    }

    #[test]
    fn system_instruction_keeps_instruction_order() {
        let text = PromptProfile::with_samples("sample").system_instruction();
        let positions: Vec<usize> = INSTRUCTIONS.iter().map(|i| text.find(i).unwrap()).collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
        assert!(text.contains("<your_role>\nProfessional marketing content writer\n</your_role>"));
        assert!(text.ends_with("- Use markdown to format your answers.\n</additional_information>"));
    }

    #[test]
    fn system_instruction_skips_markdown_note_when_disabled() {
        let mut profile = PromptProfile::with_samples("sample");
        profile.markdown = false;
        let text = profile.system_instruction();
        assert!(text.ends_with("</instructions>"));
        assert!(!text.contains(MARKDOWN_NOTE));
    }
}
