// Resume generation: form validation, prompt formatting, the inference call,
// PDF rendering and storage of the finished document.
// All LLM calls go through llm_client — no direct HTTP calls here.

pub mod generator;
pub mod handlers;
pub mod prompts;
