fn main() {
    // Generate the server skeleton inspected by the integration tests.
    // Settings come from [package.metadata.crudgen-codegen]; output goes to OUT_DIR.
    crudgen_codegen::generate_from_cargo_metadata().expect("codegen failed");
}
