// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Proxy Generator
//
// Ahead-of-time replacement for runtime type emission: loads a contract
// file, runs discovery and synthesis, renders every synthesized proxy as
// Rust source, and writes a JSON mapping manifest for the host serializer.

use crate::codegen::manifest;
use crate::codegen::rust_backend::{enum_spec, proxy_spec, EnumSpec, ProxySpec};
use crate::contract_file::{self, LoadedContracts};
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tera::Tera;
use wiremap::contract::EnumDef;
use wiremap::MessageMapper;

const PROXY_TEMPLATE: &str = include_str!("../templates/proxy.rs.tera");

/// Generator state.
pub struct ProxyGenerator {
    mapper: MessageMapper,
    enums: Vec<Arc<EnumDef>>,
    source: String,
    out_dir: PathBuf,
    tera: Tera,
}

/// What a generation run produced.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub files: Vec<PathBuf>,
    pub mappings: usize,
    pub unmapped: Vec<String>,
}

impl GenerationReport {
    pub fn summary(&self) {
        tracing::info!(
            "Generated {} file(s) covering {} mapping(s)",
            self.files.len(),
            self.mappings
        );
        for file in &self.files {
            tracing::info!("  {}", file.display());
        }
        for name in &self.unmapped {
            tracing::warn!("  unmapped interface: {}", name);
        }
    }
}

impl ProxyGenerator {
    /// Load the contract file and initialize the mapper.
    pub fn new(contract_path: PathBuf, out_dir: PathBuf) -> Result<Self> {
        tracing::info!("Loading contracts from: {:?}", contract_path);
        let LoadedContracts { set, roots, enums } = contract_file::load(&contract_path)?;

        let mut mapper = MessageMapper::new(set);
        mapper
            .initialize(roots)
            .context("Failed to initialize mapper from contract roots")?;

        let mut tera = Tera::default();
        tera.add_raw_template("proxy", PROXY_TEMPLATE)
            .context("Failed to parse proxy template")?;

        Ok(Self {
            mapper,
            enums,
            source: contract_path.display().to_string(),
            out_dir,
            tera,
        })
    }

    /// Generate all artifacts (proxy source + manifest).
    pub fn generate(&self) -> Result<GenerationReport> {
        tracing::info!("Starting proxy generation");
        fs::create_dir_all(&self.out_dir).context("Failed to create output directory")?;

        let mut report = GenerationReport::default();
        let generated_at = chrono::Utc::now().to_rfc3339();

        tracing::info!("Stage 1: Rendering proxy source");
        self.generate_source(&mut report, &generated_at)?;

        tracing::info!("Stage 2: Writing mapping manifest");
        self.generate_manifest(&mut report, &generated_at)?;

        tracing::info!("[OK] Generation complete");
        Ok(report)
    }

    fn generate_source(&self, report: &mut GenerationReport, generated_at: &str) -> Result<()> {
        let mut proxies: Vec<ProxySpec> = self
            .mapper
            .registry()
            .mappings()
            .map(|(interface, concrete)| proxy_spec(self.mapper.contracts(), interface, concrete))
            .collect();
        proxies.sort_by(|a, b| a.interface.cmp(&b.interface));
        report.mappings = proxies.len();

        let enums: Vec<EnumSpec> = self.enums.iter().map(enum_spec).collect();

        let mut ctx = tera::Context::new();
        ctx.insert("generated_at", generated_at);
        ctx.insert("source", &self.source);
        ctx.insert("proxies", &proxies);
        ctx.insert("enums", &enums);

        let rendered = self
            .tera
            .render("proxy", &ctx)
            .context("Failed to render proxy template")?;

        let path = self.out_dir.join("messages.rs");
        fs::write(&path, rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        report.files.push(path);
        Ok(())
    }

    fn generate_manifest(&self, report: &mut GenerationReport, generated_at: &str) -> Result<()> {
        let manifest = manifest::build(&self.mapper, &self.source, generated_at.to_string());
        report.unmapped = manifest.unmapped.clone();

        let json =
            serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
        let path = self.out_dir.join("mapping.json");
        fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        report.files.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CONTRACTS: &str = r#"
namespace: shop.orders
enums:
  - name: Status
    variants:
      - { name: Placed, value: 0 }
      - { name: Shipped, value: 1 }
interfaces:
  - name: IOrder
    properties:
      - { name: Id, type: uuid }
      - { name: Total, type: decimal }
      - { name: Status, type: Status }
      - { name: Item, type: IOrderLine }
      - name: Placed
        type: timestamp
        annotations:
          - { name: rename, values: { to: placed_at } }
  - name: IOrderLine
    properties:
      - { name: Sku, type: string }
      - { name: Quantity, type: u32 }
roots:
  - IOrder
"#;

    fn write_contracts(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("orders.yaml");
        let mut file = fs::File::create(&path).expect("create contract file");
        file.write_all(CONTRACTS.as_bytes()).expect("write contracts");
        path
    }

    #[test]
    fn test_end_to_end_generation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let contract_path = write_contracts(dir.path());
        let out_dir = dir.path().join("generated");

        let generator =
            ProxyGenerator::new(contract_path, out_dir.clone()).expect("generator init");
        let report = generator.generate().expect("generate");

        assert_eq!(report.mappings, 2);
        assert!(report.unmapped.is_empty());

        let source = fs::read_to_string(out_dir.join("messages.rs")).expect("read source");
        // Trait + sealed struct per contract, accessors in snake case.
        assert!(source.contains("pub trait IOrder {"));
        assert!(source.contains("pub struct IOrder__impl {"));
        assert!(source.contains("fn set_total(&mut self, value: wiremap::instance::Decimal)"));
        assert!(source.contains("field_item: IOrderLine__impl,"));
        assert!(source.contains("// hint: rename(to = \"placed_at\")"));
        // Timestamps get an explicit zero in the Default impl.
        assert!(source.contains("field_placed: chrono::DateTime::UNIX_EPOCH,"));
        // Enums are emitted with their discriminants.
        assert!(source.contains("pub enum Status {"));
        assert!(source.contains("Shipped = 1,"));

        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out_dir.join("mapping.json")).unwrap())
                .expect("manifest json");
        assert_eq!(
            manifest["mappings"][0]["interface"],
            "shop.orders.IOrder"
        );
        assert_eq!(
            manifest["mappings"][0]["concrete"],
            "shop.orders.IOrder__impl"
        );
        assert_eq!(manifest["names"]["shop.orders.IOrderLine"], "contract");
    }

    #[test]
    fn test_method_interfaces_reported_unmapped() {
        let yaml = r#"
namespace: shop
interfaces:
  - name: ICallback
    methods: [invoke]
roots: [ICallback]
"#;
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("contracts.yaml");
        fs::write(&path, yaml).expect("write");
        let generator =
            ProxyGenerator::new(path, dir.path().join("out")).expect("generator init");
        let report = generator.generate().expect("generate");
        assert_eq!(report.mappings, 0);
        assert_eq!(report.unmapped, ["shop.ICallback"]);
    }
}
