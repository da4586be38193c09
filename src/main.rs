fn main() -> miette::Result<()> {
    file_creator::cli::run()?;
    Ok(())
}
