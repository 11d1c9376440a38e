use anyhow::{Context, Result};
use qaaws_core::{Qaaws, QaawsConfig, RequestOptions};
use tracing::info;

use qaaws_cli::output::render_table;

use crate::cli::{OutputArg, RequestArgs};

pub fn run_request(args: &RequestArgs, config: QaawsConfig) -> Result<()> {
    let qaaws = Qaaws::new(config).context("create client")?;

    let mut options = RequestOptions::from_pairs(args.params.iter().cloned());
    if let Some(lov) = &args.lov {
        options = options.lov(lov.clone());
    }
    if let Some(action) = &args.soap_action {
        options = options.soap_action(action.clone());
    }

    let table = qaaws.request(&options).context("request failed")?;
    info!(records = table.len(), "received rows");

    match args.output {
        OutputArg::Json => println!("{}", table.to_json().context("serialize rows")?),
        OutputArg::Pretty => println!("{}", table.to_json_pretty().context("serialize rows")?),
        OutputArg::Table => println!("{}", render_table(&table)),
    }
    Ok(())
}

pub fn run_operations(config: QaawsConfig) -> Result<()> {
    let qaaws = Qaaws::new(config).context("create client")?;
    let operations = qaaws.operations().context("load service definition")?;
    for operation in operations {
        println!("{operation}");
    }
    Ok(())
}
