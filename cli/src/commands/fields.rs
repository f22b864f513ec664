use anyhow::{Context, Result};
use sf1map::{DataDictionary, HeadingEntry};
use tracing::info;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::FieldsArgs) -> Result<()> {
    let dictionary = DataDictionary::from_path(&args.descriptors)
        .with_context(|| format!("[fields] Failed to load descriptors from {}", args.descriptors.display()))?;
    info!("[fields] {} field codes in {} heading groups", dictionary.len(), dictionary.headings().len());

    let prefix = args.prefix.as_deref().unwrap_or("");
    for group in dictionary.headings() {
        for entry in group {
            if let HeadingEntry::Field { label, code } = entry {
                if !code.starts_with(prefix) { continue }
                let location = dictionary.lookup(code)?;
                println!("{code}\t{}\t{}\t{label}", location.segment, location.column);
            }
        }
    }

    Ok(())
}
