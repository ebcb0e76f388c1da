// src/config/mod.rs

//! Step inputs and their validated form.
//!
//! - [`inputs`] reads the raw `INPUT_*` values the host provides.
//! - [`model`] holds the validated [`InvocationRequest`].
//! - [`validate`] turns [`RawInputs`] into an [`InvocationRequest`].

pub mod inputs;
pub mod model;
pub mod validate;

pub use inputs::{EnvInputs, InputSource, LayeredInputs, MapInputs, load_inputs};
pub use model::{InvocationRequest, RawInputs};
