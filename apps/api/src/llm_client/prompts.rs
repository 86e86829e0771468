// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Instruction that keeps every claim anchored to supplied resume evidence.
pub const GROUNDING_INSTRUCTION: &str = "\
    Only make claims supported by the provided resume snippets and biography. \
    Do NOT infer, interpolate, or invent details. \
    If the context does not support a claim, omit it entirely.";

/// Plain-prose output constraint shared by letter-style generations.
pub const PROSE_ONLY_INSTRUCTION: &str = "\
    Respond with the letter text only. \
    No bullet points, no markdown, no preamble or sign-off commentary.";
