use anyhow::Result;
use filmstack::batch::Batch;
use filmstack::settings;

fn main() -> Result<()> {
    env_logger::init();

    let settings = settings::load_config()?;
    let mut batch = Batch::new(settings)?;

    batch.solve();
    batch.writeup()?;
    batch.check()
}
