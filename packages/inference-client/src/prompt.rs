//! Instruction-prompt formatting for Mistral/Mixtral instruct models.

/// Wrap a system instruction and a user message in the instruct delimiters
/// the backend model was tuned on.
///
/// Total: any input, including empty strings, yields a well-formed prompt.
pub fn format_instruct_prompt(system: &str, message: &str) -> String {
    format!("<s>[SYS] {} [/SYS][INST] {} [/INST]", system, message)
}
