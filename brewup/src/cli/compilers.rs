use brewup_common::error::Result;
use brewup_common::CompilerSelector;
use clap::Args;

#[derive(Args, Debug)]
pub struct Compilers;

impl Compilers {
    pub fn run(&self) -> Result<()> {
        for selector in CompilerSelector::ALL {
            let package = selector
                .package_request()
                .map(|request| request.install_args().join(" "))
                .unwrap_or_else(|| "(host default clang)".to_string());
            println!("{:<15} {}", selector.as_str(), package);
        }
        Ok(())
    }
}
