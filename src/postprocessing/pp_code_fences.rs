const FENCE_JSON: &str = "```json";
const FENCE: &str = "```";


fn _between(text: &str, opening: &str) -> Option<String> {
    let start = text.find(opening)? + opening.len();
    let rest = &text[start..];
    let inner = match rest.find(FENCE) {
        Some(end) => &rest[..end],
        None => rest,
    };
    Some(inner.trim().to_string())
}

/// Models like to wrap JSON into a markdown code block even when told not to.
/// Takes the inside of the first ```json block, or else of the first bare ``` block.
/// A block without a closing fence runs to the end of the text.
pub fn strip_code_fences(text: &str) -> String {
    let text = text.trim();
    if let Some(inner) = _between(text, FENCE_JSON) {
        return inner;
    }
    if let Some(inner) = _between(text, FENCE) {
        return inner;
    }
    text.to_string()
}
