use crate::output::print_json;
use provgen_core::regions::RegionCatalog;

pub fn run(json: bool) -> anyhow::Result<()> {
    // Catalog failures mean "validation unavailable"; the command reports
    // that instead of failing.
    let catalog = match RegionCatalog::fetch() {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::warn!("region catalog unavailable: {e}");
            RegionCatalog::unavailable()
        }
    };

    if json {
        return print_json(&catalog.regions().to_vec());
    }

    if !catalog.is_available() {
        println!("The region catalog is empty; location validation is disabled.");
        return Ok(());
    }
    for region in catalog.regions() {
        println!("{region}");
    }
    Ok(())
}
