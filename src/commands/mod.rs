pub mod assist;
pub mod build;
pub mod check;
pub mod fix;

use std::error::Error;
use std::fs;

use log::info;

/// Write the generated document where the user asked for it. The default
/// filename matches what the firmware tooling expects to pick up.
pub fn write_output(yaml: &str, output: &str, to_stdout: bool) -> Result<(), Box<dyn Error>> {
    if to_stdout {
        print!("{}", yaml);
    } else {
        fs::write(output, yaml)?;
        info!("Wrote {} bytes to {}", yaml.len(), output);
        println!("Wrote {}", output);
    }
    Ok(())
}
