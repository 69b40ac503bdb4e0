//! List command: catalog contents with installed markers

use colored::Colorize;
use foundry_core::placement::place;
use foundry_core::{CatalogProvider, ContentType, Error as CoreError, InstallScope, State};

use crate::context::Context;
use crate::error::Result;

/// Run the list command
pub fn run_list(ctx: &Context, category: Option<&str>) -> Result<()> {
    let catalog = ctx.catalog()?;
    let state = ctx.store().load()?;

    let categories = match category {
        Some(name) => vec![name.to_string()],
        None => catalog.categories()?,
    };

    if categories.is_empty() {
        println!("Catalog is empty.");
        return Ok(());
    }

    for name in &categories {
        let files = catalog.list_files(name, None)?;
        println!("{}", name.cyan().bold());

        for kind in ContentType::ALL {
            let of_kind: Vec<_> = files.iter().filter(|f| f.kind == kind).collect();
            if of_kind.is_empty() {
                continue;
            }
            println!("  {}:", kind.dir_name().bold());
            for file in of_kind {
                let scopes = installed_scopes(ctx, &state, name, kind, &file.filename)?;
                if scopes.is_empty() {
                    println!("      {}", file.filename);
                } else {
                    let labels: Vec<String> = scopes.iter().map(|s| s.to_string()).collect();
                    println!(
                        "    {} {} {}",
                        "*".green(),
                        file.filename,
                        format!("(installed: {})", labels.join(", ")).dimmed()
                    );
                }
            }
        }
        println!();
    }

    println!("{} marks installed items.", "*".green());
    Ok(())
}

/// Roots where `category`/`filename` is tracked
fn installed_scopes(
    ctx: &Context,
    state: &State,
    category: &str,
    kind: ContentType,
    filename: &str,
) -> std::result::Result<Vec<InstallScope>, CoreError> {
    let mut scopes = Vec::new();
    for (scope, root) in ctx.locations.roots() {
        let placement = place(&root, category, kind, filename)?;
        if state.is_tracked(&placement.path) {
            scopes.push(scope);
        }
    }
    Ok(scopes)
}
