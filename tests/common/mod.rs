#![allow(dead_code, unused_imports)]

pub use cortex_action_test_utils::builders::{InputsBuilder, RequestBuilder};
pub use cortex_action_test_utils::fake_cortex::{FakeCortex, runner_without_cortex};
pub use cortex_action_test_utils::recording::{LogLine, MemoryOutputs, RecordingLog};
pub use cortex_action_test_utils::{init_tracing, with_timeout};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
