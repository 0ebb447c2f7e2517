use anyhow::Result;

fn main() -> Result<()> {
    license_tracker::cli::run()
}
