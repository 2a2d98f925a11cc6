fn main() -> Result<(), Box<dyn std::error::Error>> {
    commux_codegen::configure().compile(&["schema/echo.json", "schema/sync_space.json"])?;
    Ok(())
}
