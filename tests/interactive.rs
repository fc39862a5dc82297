//! Interactive loop integration tests
//!
//! Run whole question sessions against an in-memory index with
//! scripted input and an in-memory console.

mod common;

// Interactive submodules - tests/interactive/ directory
mod interactive {
    pub mod test_session;
}
