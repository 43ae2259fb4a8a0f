pub mod ai_chat;
pub mod ai_proxy;
pub mod normalizer;
pub mod prompts;
pub mod test_case_generator;

#[cfg(test)]
pub(crate) mod fakes;
