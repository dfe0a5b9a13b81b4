// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// Orchestrates the other layers to run the classification
// pipeline. No model math and no argument parsing here; the CLI
// turns its flags into a ClassifyConfig and calls execute().

/// Load → filter → split → encode → train → predict
pub mod classify_use_case;
