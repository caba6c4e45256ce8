fn main() -> anyhow::Result<()> {
    etl_filter::run()
}
