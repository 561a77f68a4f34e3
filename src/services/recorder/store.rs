//! Document store interface and Elasticsearch-compatible implementation.

use async_trait::async_trait;
use serde_json::Value;

use anyhow::Context;

/// Interface for durable, partitioned, schema-less document storage
///
/// The store is assumed to buffer writes before making them searchable;
/// `refresh` forces newly written documents to become visible.
#[async_trait]
pub trait DocumentStore: Send + Sync {
	/// Writes a document into a partition
	///
	/// # Arguments
	/// * `partition` - Target partition name
	/// * `document` - The JSON document to persist
	///
	/// # Returns
	/// * `Result<(), anyhow::Error>` - Success or error
	async fn index(&self, partition: &str, document: &Value) -> Result<(), anyhow::Error>;

	/// Makes documents written to a partition visible to readers
	///
	/// # Arguments
	/// * `partition` - Partition to refresh
	///
	/// # Returns
	/// * `Result<(), anyhow::Error>` - Success or error
	async fn refresh(&self, partition: &str) -> Result<(), anyhow::Error>;
}

/// Elasticsearch-compatible HTTP document store
#[derive(Debug, Clone)]
pub struct ElasticStore {
	http: reqwest::Client,
	base_url: String,
	username: Option<String>,
	password: Option<String>,
}

impl ElasticStore {
	/// Creates a new store client
	///
	/// # Arguments
	/// * `base_url` - Cluster base URL
	/// * `username` / `password` - Optional basic-auth credentials
	pub fn new(base_url: String, username: Option<String>, password: Option<String>) -> Self {
		Self {
			http: reqwest::Client::new(),
			base_url: base_url.trim_end_matches('/').to_string(),
			username,
			password,
		}
	}

	fn request(&self, url: String) -> reqwest::RequestBuilder {
		let mut request = self.http.post(url);
		if let Some(username) = &self.username {
			request = request.basic_auth(username, self.password.as_deref());
		}
		request
	}
}

#[async_trait]
impl DocumentStore for ElasticStore {
	async fn index(&self, partition: &str, document: &Value) -> Result<(), anyhow::Error> {
		self.request(format!("{}/{}/_doc", self.base_url, partition))
			.json(document)
			.send()
			.await
			.with_context(|| format!("Failed to send document to partition {}", partition))?
			.error_for_status()
			.with_context(|| format!("Store rejected document for partition {}", partition))?;
		Ok(())
	}

	async fn refresh(&self, partition: &str) -> Result<(), anyhow::Error> {
		self.request(format!("{}/{}/_refresh", self.base_url, partition))
			.send()
			.await
			.with_context(|| format!("Failed to request refresh of partition {}", partition))?
			.error_for_status()
			.with_context(|| format!("Store rejected refresh of partition {}", partition))?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_base_url_is_normalized() {
		let store = ElasticStore::new("https://es.example.com/".to_string(), None, None);
		assert_eq!(store.base_url, "https://es.example.com");
	}
}
