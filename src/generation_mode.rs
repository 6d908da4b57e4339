use rand::Rng;

use crate::yaml_configs::generation_loader::PromptTemplates;


const OUTLINE_PREFIX: &str = "outline:";
const SECTION_PREFIX: &str = "section:";
const SECTION_TOPIC_SEPARATOR: &str = "|topic:";


#[derive(Debug, Clone, PartialEq)]
pub enum GenerationMode {
    FullPost { topic: String },
    Outline { topic: String },
    SectionOnly { section: String, topic: String },
    /// Anything unrecognized goes to the model as written.
    FreeForm(String),
}

/// Uniform pick, repeats allowed. `topics` is never empty, the config loader refuses that.
pub fn pick_topic<'a, R: Rng + ?Sized>(topics: &'a [String], rng: &mut R) -> &'a str {
    &topics[rng.gen_range(0..topics.len())]
}

impl GenerationMode {
    pub fn classify<R: Rng + ?Sized>(q: Option<&str>, topics: &[String], rng: &mut R) -> Self {
        let q = q.unwrap_or("");
        if q.is_empty() || q.eq_ignore_ascii_case("generate") || q.eq_ignore_ascii_case("demo") {
            return GenerationMode::FullPost { topic: pick_topic(topics, rng).to_string() };
        }
        if let Some(rest) = q.strip_prefix(OUTLINE_PREFIX) {
            return GenerationMode::Outline { topic: rest.trim().to_string() };
        }
        if let Some(rest) = q.strip_prefix(SECTION_PREFIX) {
            let mut parts = rest.split(SECTION_TOPIC_SEPARATOR);
            let section = parts.next().unwrap_or("").trim().to_string();
            // "section: Intro" without a topic part still produces an instruction, with an empty topic
            let topic = parts.next().unwrap_or("").trim().to_string();
            return GenerationMode::SectionOnly { section, topic };
        }
        GenerationMode::FreeForm(q.to_string())
    }

    pub fn name(&self) -> &'static str {
        match self {
            GenerationMode::FullPost { .. } => "FULL_POST",
            GenerationMode::Outline { .. } => "OUTLINE",
            GenerationMode::SectionOnly { .. } => "SECTION_ONLY",
            GenerationMode::FreeForm(_) => "FREE_FORM",
        }
    }

    pub fn instruction(&self, templates: &PromptTemplates) -> String {
        match self {
            GenerationMode::FullPost { topic } => templates.full_post.replace("%TOPIC%", topic),
            GenerationMode::Outline { topic } => templates.outline.replace("%TOPIC%", topic),
            GenerationMode::SectionOnly { section, topic } => templates.section
                .replace("%SECTION%", section)
                .replace("%TOPIC%", topic),
            GenerationMode::FreeForm(q) => q.clone(),
        }
    }
}

pub fn finalize_instruction(instruction: &str, strict_suffix: &str) -> String {
    format!("{}\n\n{}", instruction, strict_suffix)
}
