//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, EnumKind, OutputFormat};
use crate::config::{load_config, ClientConfig};
use crate::error::{Error, Result};
use crate::features::FeaturesClient;
use crate::http::ServiceClient;
use crate::models::{
    ChatMessageType, ComputeNodeState, CustomHostNameDnsRecordType, FeatureResult, FeatureState,
    OsType,
};
use crate::pagination::{ObserverCallback, PagingBehavior};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::ListFeatures {
                namespace,
                max_pages,
            } => self.list_features(namespace.as_deref(), *max_pages).await,
            Commands::GetFeature { namespace, name } => self.get_feature(namespace, name).await,
            Commands::RegisterFeature { namespace, name } => {
                self.register_feature(namespace, name).await
            }
            Commands::ParseEnum { kind, value } => {
                emit(self.cli.format, &describe_enum(*kind, value));
                Ok(())
            }
        }
    }

    /// Resolve configuration: file, then environment, then flags
    fn client_config(&self) -> Result<ClientConfig> {
        let config = match &self.cli.config {
            Some(path) => load_config(path)?,
            None => ClientConfig::default(),
        };
        let mut config = config.with_env_overrides();

        if let Some(subscription) = &self.cli.subscription {
            config.subscription_id = Some(subscription.clone());
        }
        Ok(config)
    }

    fn features_client(&self) -> Result<FeaturesClient> {
        let config = self.client_config()?;
        debug!("Using endpoint {}", config.base_url);
        let client = ServiceClient::new(config)?;
        Ok(FeaturesClient::new(Arc::new(client)))
    }

    /// Stream features to stdout as pages arrive
    async fn list_features(&self, namespace: Option<&str>, max_pages: Option<usize>) -> Result<()> {
        let features = self.features_client()?;
        let format = self.cli.format;

        emit(
            format,
            &json!({
                "type": "LOG",
                "log": {
                    "level": "INFO",
                    "message": match namespace {
                        Some(ns) => format!("Listing features of {ns}"),
                        None => "Listing all features".to_string(),
                    }
                }
            }),
        );

        let mut pages = 0usize;
        let (callback, done) = ObserverCallback::new(move |items: &[FeatureResult]| {
            pages += 1;
            for feature in items {
                emit(format, &record(feature));
            }
            match max_pages {
                Some(max) if pages >= max => PagingBehavior::Stop,
                _ => PagingBehavior::Continue,
            }
        });

        let call = match namespace {
            Some(ns) => features.list_async(ns, callback),
            None => features.list_all_async(callback),
        };

        let outcome = done
            .await
            .map_err(|_| Error::Other("Listing ended without reporting an outcome".to_string()))?;
        if let Some(call) = call {
            call.join().await?;
        }

        let items = outcome?;
        emit(
            format,
            &json!({
                "type": "SUMMARY",
                "summary": {
                    "count": items.len(),
                    "registered": items.iter().filter(|f| f.is_registered()).count()
                }
            }),
        );
        Ok(())
    }

    async fn get_feature(&self, namespace: &str, name: &str) -> Result<()> {
        let response = self.features_client()?.get(namespace, name).await?;
        emit(self.cli.format, &record(response.body()));
        Ok(())
    }

    async fn register_feature(&self, namespace: &str, name: &str) -> Result<()> {
        let response = self.features_client()?.register(namespace, name).await?;
        emit(self.cli.format, &record(response.body()));
        Ok(())
    }
}

fn record(feature: &FeatureResult) -> Value {
    json!({
        "type": "RECORD",
        "record": feature
    })
}

/// Look `value` up in the enumeration named by `kind`
pub(crate) fn describe_enum(kind: EnumKind, value: &str) -> Value {
    let (resolved, known): (Option<String>, bool) = match kind {
        EnumKind::OsType => fixed(OsType::from_str_opt(value).map(|v| v.as_str())),
        EnumKind::ComputeNodeState => {
            fixed(ComputeNodeState::from_str_opt(value).map(|v| v.as_str()))
        }
        EnumKind::DnsRecordType => {
            fixed(CustomHostNameDnsRecordType::from_str_opt(value).map(|v| v.as_str()))
        }
        EnumKind::FeatureState => {
            let parsed = FeatureState::from_name(value);
            (Some(parsed.as_str().to_string()), parsed.is_known())
        }
        EnumKind::ChatMessageType => {
            let parsed = ChatMessageType::from_name(value);
            (Some(parsed.as_str().to_string()), parsed.is_known())
        }
    };

    json!({
        "type": "ENUM",
        "enum": {
            "kind": format!("{kind:?}"),
            "input": value,
            "value": resolved,
            "known": known
        }
    })
}

fn fixed(found: Option<&'static str>) -> (Option<String>, bool) {
    (found.map(str::to_string), found.is_some())
}

fn emit(format: OutputFormat, msg: &Value) {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(msg).unwrap_or_default());
        }
        OutputFormat::Pretty => {
            println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
        }
    }
}
