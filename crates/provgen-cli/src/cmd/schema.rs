use crate::output::{print_json, print_table};
use clap::Subcommand;
use provgen_core::registry::SchemaRegistry;
use provgen_core::types::ResourceType;

#[derive(Subcommand)]
pub enum SchemaSubcommand {
    /// List resource types in the static registry
    List,

    /// Show the parameter schema for one resource type
    Show {
        /// e.g. "resource group"
        resource_type: String,
    },
}

pub fn run(subcommand: SchemaSubcommand, json: bool) -> anyhow::Result<()> {
    let registry = SchemaRegistry::builtin();
    match subcommand {
        SchemaSubcommand::List => list(&registry, json),
        SchemaSubcommand::Show { resource_type } => show(&registry, &resource_type, json),
    }
}

fn list(registry: &SchemaRegistry, json: bool) -> anyhow::Result<()> {
    if json {
        let entries: Vec<_> = registry
            .iter()
            .map(|(ty, schema)| {
                serde_json::json!({
                    "resource_type": ty.as_str(),
                    "parameters": schema.params().iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
                })
            })
            .collect();
        return print_json(&entries);
    }

    let rows: Vec<Vec<String>> = registry
        .iter()
        .map(|(ty, schema)| {
            vec![
                ty.to_string(),
                schema
                    .params()
                    .iter()
                    .map(|p| p.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            ]
        })
        .collect();
    print_table(&["RESOURCE TYPE", "PARAMETERS"], &rows);
    Ok(())
}

fn show(registry: &SchemaRegistry, resource_type: &str, json: bool) -> anyhow::Result<()> {
    let ty = ResourceType::new(resource_type);
    let Some(schema) = registry.resolve(&ty) else {
        anyhow::bail!("no schema for resource type '{ty}'");
    };

    if json {
        return print_json(schema);
    }

    println!("{ty}");
    let rows: Vec<Vec<String>> = schema
        .params()
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                p.value_kind.to_string(),
                if p.required { "yes" } else { "no" }.to_string(),
                p.prompt.clone(),
            ]
        })
        .collect();
    print_table(&["NAME", "KIND", "REQUIRED", "PROMPT"], &rows);
    Ok(())
}
