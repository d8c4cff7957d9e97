//! Integration tests for the tool catalogue, driven by a scripted runner.

mod common;

mod tools {
    mod test_branches;
    mod test_config;
    mod test_dispatch;
    mod test_envelope;
    mod test_gating;
    mod test_safety;
    mod test_tags;
}
