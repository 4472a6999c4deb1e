//! Parse command implementation.
use crate::cli::args::{OutputFormat, ParseArgs};
use mdcontent::Document;

pub fn run(args: ParseArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.parser_config()?;
    let doc = Document::from_path(&args.file, &config)?;

    for warning in &doc.warnings {
        eprintln!("warning: {warning}");
    }

    let out = match format {
        OutputFormat::Json if args.compact => serde_json::to_string(&doc)?,
        OutputFormat::Json => serde_json::to_string_pretty(&doc)?,
        OutputFormat::Yaml => serde_yaml::to_string(&doc)?,
        OutputFormat::Summary => doc.content.to_string(),
    };

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, &out)?;
        eprintln!("Output written to: {}", output_path.display());
    } else {
        println!("{}", out.trim_end());
    }

    Ok(())
}
