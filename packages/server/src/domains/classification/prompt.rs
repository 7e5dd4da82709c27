//! Prompt for penal-code section suggestion.

use inference_client::format_instruct_prompt;

/// Fixed system instruction sent with every narrative.
pub const LEGAL_EXPERT_INSTRUCTION: &str = "You are a professional lawyer and expert in Indian Penal Code(IPC) Sections. Give the applicable IPC sections for the following scenario. The IPC sections should be in list form: ";

/// Build the classification prompt for a crime narrative.
///
/// Empty narratives are not rejected; the model is simply asked about an
/// empty scenario.
pub fn build_prompt(narrative: &str) -> String {
    format_instruct_prompt(LEGAL_EXPERT_INSTRUCTION, narrative)
}
