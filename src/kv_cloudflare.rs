use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::custom_error::MapErrToString;
use crate::kv_store::KvStore;


const LIST_PAGE_MIN: usize = 10;
const LIST_PAGE_MAX: usize = 1000;

/// Cloudflare Workers KV over the REST API, one namespace per instance.
pub struct CloudflareKv {
    client: reqwest::Client,
    api_base_url: String,
    account_id: String,
    namespace_id: String,
    api_token: String,
}

#[derive(Deserialize)]
struct KeyName {
    name: String,
}

#[derive(Deserialize, Default)]
struct ResultInfo {
    #[serde(default)]
    cursor: String,
}

#[derive(Deserialize)]
struct ListKeysResponse {
    #[serde(default)]
    result: Vec<KeyName>,
    #[serde(default)]
    result_info: ResultInfo,
}

impl CloudflareKv {
    pub fn new(
        client: reqwest::Client,
        api_base_url: &str,
        account_id: &str,
        namespace_id: &str,
        api_token: &str,
    ) -> Self {
        CloudflareKv {
            client,
            api_base_url: api_base_url.to_string(),
            account_id: account_id.to_string(),
            namespace_id: namespace_id.to_string(),
            api_token: api_token.to_string(),
        }
    }

    fn _namespace_url(&self, tail: &[&str]) -> Result<Url, String> {
        let mut url = Url::parse(&self.api_base_url).map_err_with_prefix("bad api base url:")?;
        url.path_segments_mut()
            .map_err(|_| format!("api base url {} cannot have a path", self.api_base_url))?
            .pop_if_empty()
            .extend(&["accounts", self.account_id.as_str(), "storage", "kv", "namespaces", self.namespace_id.as_str()])
            .extend(tail);
        Ok(url)
    }
}

#[async_trait]
impl KvStore for CloudflareKv {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        let url = self._namespace_url(&["values", key])?;
        let resp = self.client.get(url.clone())
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err_with_prefix(format!("kv get {}:", key))?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let text = resp.text().await.map_err_with_prefix(format!("reading from socket {}:", url))?;
        if !status.is_success() {
            return Err(format!("kv get {} status={} text {}", key, status, text));
        }
        Ok(Some(text))
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), String> {
        let url = self._namespace_url(&["values", key])?;
        let resp = self.client.put(url)
            .bearer_auth(&self.api_token)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(value.to_string())
            .send()
            .await
            .map_err_with_prefix(format!("kv put {}:", key))?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(format!("kv put {} status={} text {}", key, status, text));
        }
        Ok(())
    }

    async fn list(&self, limit: Option<usize>) -> Result<Vec<String>, String> {
        let page_size = limit.unwrap_or(LIST_PAGE_MAX).clamp(LIST_PAGE_MIN, LIST_PAGE_MAX);
        let mut names: Vec<String> = vec![];
        let mut cursor = String::new();
        loop {
            let mut url = self._namespace_url(&["keys"])?;
            url.query_pairs_mut().append_pair("limit", &page_size.to_string());
            if !cursor.is_empty() {
                url.query_pairs_mut().append_pair("cursor", &cursor);
            }
            let resp = self.client.get(url)
                .bearer_auth(&self.api_token)
                .send()
                .await
                .map_err_with_prefix("kv list:")?;
            let status = resp.status();
            let text = resp.text().await.map_err_with_prefix("kv list, reading from socket:")?;
            if !status.is_success() {
                return Err(format!("kv list status={} text {}", status, text));
            }
            let page: ListKeysResponse = serde_json::from_str(&text).map_err_with_prefix("kv list, bad json:")?;
            debug!("kv list page: {} keys", page.result.len());
            names.extend(page.result.into_iter().map(|k| k.name));
            if let Some(n) = limit {
                if names.len() >= n {
                    names.truncate(n);
                    break;
                }
            }
            if page.result_info.cursor.is_empty() {
                break;
            }
            cursor = page.result_info.cursor;
        }
        Ok(names)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn kv(server: &mockito::ServerGuard) -> CloudflareKv {
        CloudflareKv::new(reqwest::Client::new(), &server.url(), "acc", "ns", "secret")
    }

    #[tokio::test]
    async fn test_get_existing_and_missing() {
        let mut server = mockito::Server::new_async().await;
        let _found = server.mock("GET", "/accounts/acc/storage/kv/namespaces/ns/values/s1")
            .match_header("authorization", "Bearer secret")
            .with_status(200)
            .with_body("[]")
            .create_async().await;
        let _missing = server.mock("GET", "/accounts/acc/storage/kv/namespaces/ns/values/nope")
            .with_status(404)
            .with_body(r#"{"success":false,"errors":[{"code":10009,"message":"get: 'key not found'"}]}"#)
            .create_async().await;
        let store = kv(&server);
        assert_eq!(store.get("s1").await.unwrap(), Some("[]".to_string()));
        assert_eq!(store.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server.mock("GET", "/accounts/acc/storage/kv/namespaces/ns/values/s1")
            .with_status(500)
            .with_body("oops")
            .create_async().await;
        let err = kv(&server).get("s1").await.unwrap_err();
        assert!(err.contains("status=500"));
    }

    #[tokio::test]
    async fn test_put_sends_body() {
        let mut server = mockito::Server::new_async().await;
        let m = server.mock("PUT", "/accounts/acc/storage/kv/namespaces/ns/values/s1")
            .match_body("[{\"role\":\"user\",\"content\":\"hi\"}]")
            .with_status(200)
            .with_body(r#"{"success":true}"#)
            .create_async().await;
        kv(&server).put("s1", "[{\"role\":\"user\",\"content\":\"hi\"}]").await.unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_follows_cursor() {
        let mut server = mockito::Server::new_async().await;
        let _p1 = server.mock("GET", "/accounts/acc/storage/kv/namespaces/ns/keys")
            .match_query(Matcher::Exact("limit=1000".into()))
            .with_status(200)
            .with_body(r#"{"success":true,"result":[{"name":"a.md"},{"name":"b.md"}],"result_info":{"count":2,"cursor":"next1"}}"#)
            .create_async().await;
        let _p2 = server.mock("GET", "/accounts/acc/storage/kv/namespaces/ns/keys")
            .match_query(Matcher::Exact("limit=1000&cursor=next1".into()))
            .with_status(200)
            .with_body(r#"{"success":true,"result":[{"name":"c.md"}],"result_info":{"count":1,"cursor":""}}"#)
            .create_async().await;
        let names = kv(&server).list(None).await.unwrap();
        assert_eq!(names, vec!["a.md", "b.md", "c.md"]);
    }

    #[tokio::test]
    async fn test_list_limit_truncates() {
        let mut server = mockito::Server::new_async().await;
        let _m = server.mock("GET", "/accounts/acc/storage/kv/namespaces/ns/keys")
            .match_query(Matcher::UrlEncoded("limit".into(), "10".into()))
            .with_status(200)
            .with_body(r#"{"success":true,"result":[{"name":"a"},{"name":"b"}],"result_info":{"cursor":"more"}}"#)
            .create_async().await;
        let names = kv(&server).list(Some(1)).await.unwrap();
        assert_eq!(names, vec!["a"]);
    }
}
