//! `order-lookup [ORDER_UID...]`
//!
//! Looks up each identifier (from the arguments, or one per line on stdin),
//! prints the resulting display markup to stdout and each failure to stderr.

use order_lookup::config::LookupConfig;
use order_lookup::lifecycle::{setup_tracing, LookupPage};
use std::io::{self, BufRead};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, info_span, Instrument};

#[tokio::main]
async fn main() -> Result<ExitCode, String> {
    setup_tracing();

    let config = LookupConfig::load().map_err(|e| e.to_string())?;
    let order_uids = order_uids().map_err(|e| e.to_string())?;
    if order_uids.is_empty() {
        info!("No order identifiers given");
        return Ok(ExitCode::SUCCESS);
    }

    info!(endpoint = %config.endpoint, orders = order_uids.len(), "Starting order lookup");
    let page = Arc::new(LookupPage::start(&config).await.map_err(|e| e.to_string())?);

    let mut lookups = JoinSet::new();
    for order_uid in order_uids {
        let page = page.clone();
        let span = info_span!("lookup", order_uid = %order_uid);
        lookups.spawn(
            async move {
                let result = page.lookup(&order_uid).await;
                (order_uid, result)
            }
            .instrument(span),
        );
    }

    let mut failures = 0;
    while let Some(joined) = lookups.join_next().await {
        let (order_uid, result) = joined.map_err(|e| e.to_string())?;
        if let Err(e) = result {
            failures += 1;
            eprintln!("{}: {}", order_uid, e);
        }
    }

    println!("{}", page.display_html().await.map_err(|e| e.to_string())?);

    let page = Arc::try_unwrap(page).map_err(|_| "page still in use".to_string())?;
    page.shutdown().await?;

    Ok(if failures == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn order_uids() -> io::Result<Vec<String>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        return Ok(args);
    }
    let mut uids = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let uid = line.trim();
        if !uid.is_empty() {
            uids.push(uid.to_string());
        }
    }
    Ok(uids)
}
