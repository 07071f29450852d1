fn main() -> anyhow::Result<()> {
    pkcore::cli::run_cli()
}
