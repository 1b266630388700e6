pub fn run() -> anyhow::Result<()> {
    println!("kubedmp {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
