pub mod use_cases;

pub use use_cases::ai_chat::ChatUseCase;
pub use use_cases::generate_tests::GenerateTestsUseCase;
pub use use_cases::test_case_generator::{CategoryTarget, GeneratorStep, TestCaseGenerator};
