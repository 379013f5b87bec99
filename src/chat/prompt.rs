// file: src/chat/prompt.rs
// description: grounding instruction construction for the study assistant

use crate::models::NoteFile;
use tracing::debug;

/// Builds the system instruction that grounds the model in the loaded notes.
///
/// Every document's name and full text is embedded verbatim between explicit
/// start/end markers; the constraints force answers to come only from that
/// content and to name the referenced protocol at the end of the reply. The
/// total embedded size is unbounded (matching the product behaviour); a
/// context overflow surfaces as a provider failure.
pub fn grounding_instruction(documents: &[NoteFile]) -> String {
    let knowledge_base = documents
        .iter()
        .map(|doc| {
            format!(
                "--- START DOCUMENT: {} ---\n{}\n--- END DOCUMENT ---",
                doc.name, doc.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    debug!(
        "Grounding {} documents ({} chars)",
        documents.len(),
        knowledge_base.len()
    );

    format!(
        "IDENTITY:\n\
         You are NoteSage, a specialized Academic Assistant. You possess deep knowledge of the North Carolina OEMS EMS Protocols.\n\
         \n\
         CORE KNOWLEDGE BASE:\n\
         {knowledge_base}\n\
         \n\
         STRICT CONSTRAINTS:\n\
         1. Answer ONLY using the provided documents.\n\
         2. If a question cannot be answered using ONLY these documents, state: \"I'm sorry, that specific information is not covered in our current class protocols.\"\n\
         3. CITATION RULE: At the end of your response, always explicitly mention which protocol you referenced (e.g., \"Referenced: UP 15\"). This allows the reader to open the source document.\n\
         4. Tone: Professional, academic, and clinical.\n\
         5. Do not hallucinate outside medical knowledge. If the protocol says 4 hours, and you think general knowledge says 6, you MUST say 4 hours."
    )
}
