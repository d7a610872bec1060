// 网盘客户端实现

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::netdisk::params::LoginParams;
use crate::netdisk::{BatchData, Envelope, LoginData, ProfileData};
use parking_lot::RwLock;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

// =====================================================
// 接口路径
// =====================================================

pub(crate) const API_USER_LOGIN: &str = "/api/v2/user/login";
pub(crate) const API_USER_INFO: &str = "/api/v2/user/info";

pub(crate) const API_FILE_UPLOAD: &str = "/api/v2/file/upload";
pub(crate) const API_FILE_UPLOAD_INFO: &str = "/api/v2/file/upload_info";
pub(crate) const API_FILE_CHECK_LINK: &str = "/api/v2/file/check_link";
pub(crate) const API_FILE_ONETIMELINK_CREATE: &str = "/api/v2/file/onetimelink_create";
pub(crate) const API_FILE_ONETIMELINK_INFO: &str = "/api/v2/file/onetimelink_info";
pub(crate) const API_FILE_DOWNLOAD: &str = "/api/v2/file/download";
pub(crate) const API_FILE_INFO: &str = "/api/v2/file/info";
pub(crate) const API_FILE_DELETE: &str = "/api/v2/file/delete";
pub(crate) const API_FILE_CHANGE_MODE: &str = "/api/v2/file/change_mode";
pub(crate) const API_FILE_RENAME: &str = "/api/v2/file/rename";
pub(crate) const API_FILE_COPY: &str = "/api/v2/file/copy";
pub(crate) const API_FILE_XCOPY: &str = "/api/v2/file/xcopy";
pub(crate) const API_FILE_HASHCOPY: &str = "/api/v2/file/hashcopy";
pub(crate) const API_FILE_MOVE: &str = "/api/v2/file/move";

pub(crate) const API_FOLDER_INFO: &str = "/api/v2/folder/info";
pub(crate) const API_FOLDER_CONTENT: &str = "/api/v2/folder/content";
pub(crate) const API_FOLDER_CREATE: &str = "/api/v2/folder/create";
pub(crate) const API_FOLDER_DELETE: &str = "/api/v2/folder/delete";
pub(crate) const API_FOLDER_RENAME: &str = "/api/v2/folder/rename";
pub(crate) const API_FOLDER_COPY: &str = "/api/v2/folder/copy";
pub(crate) const API_FOLDER_MOVE: &str = "/api/v2/folder/move";
pub(crate) const API_FOLDER_CHANGE_MODE: &str = "/api/v2/folder/change_mode";

/// 无参数请求
#[derive(Debug, Serialize)]
pub(crate) struct NoParams {}

/// Rapidgator 客户端
///
/// 登录后 token 作为 `token` 查询参数附加到之后的每个请求。
/// 克隆的实例共享同一个 token。
#[derive(Clone)]
pub struct RapidgatorClient {
    /// HTTP客户端
    client: Client,
    /// API 地址（不带末尾 `/`）
    base_url: String,
    /// 客户端配置
    config: ClientConfig,
    /// 用户名
    username: String,
    /// 密码
    password: String,
    /// 登录后获得的 token
    token: Arc<RwLock<Option<String>>>,
}

impl fmt::Debug for RapidgatorClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RapidgatorClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"***")
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}

impl RapidgatorClient {
    /// 使用默认配置创建客户端
    ///
    /// 用户名或密码为空时立即失败，不发送任何请求
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        Self::with_config(username, password, ClientConfig::default())
    }

    /// 使用指定配置创建客户端
    pub fn with_config(
        username: impl Into<String>,
        password: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let username = username.into();
        let password = password.into();

        if username.is_empty() {
            return Err(Error::EmptyUsername);
        }
        if password.is_empty() {
            return Err(Error::EmptyPassword);
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|_| Error::InvalidBaseUrl(base_url.clone()))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        info!("初始化 Rapidgator 客户端: base_url={}, user={}", base_url, username);

        Ok(Self {
            client,
            base_url,
            config,
            username,
            password,
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// 用户名
    pub fn username(&self) -> &str {
        &self.username
    }

    /// 客户端配置
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// 当前 token
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// 是否已登录
    pub fn is_logged_in(&self) -> bool {
        self.token.read().is_some()
    }

    /// 直接设置 token（恢复之前保存的会话）
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        *self.token.write() = if token.is_empty() { None } else { Some(token) };
    }

    /// 登录，获取 token 和用户信息
    ///
    /// 成功后 token 保存在客户端中；失败时清除已有 token
    pub async fn login(&self) -> Result<Envelope<LoginData>> {
        info!("登录: user={}", self.username);

        let params = LoginParams {
            login: &self.username,
            password: &self.password,
        };
        let envelope: Envelope<LoginData> = self.send(API_USER_LOGIN, &params, None).await?;

        let token = envelope
            .response()
            .map(|data| data.token.clone())
            .filter(|t| !t.is_empty());

        match &token {
            Some(_) => info!("登录成功: user={}", self.username),
            None => warn!(
                "登录失败: user={}, status={}, details={:?}",
                self.username, envelope.status, envelope.details
            ),
        }

        *self.token.write() = token;
        Ok(envelope)
    }

    /// 获取当前用户信息
    ///
    /// 本地不检查登录状态，由服务器判定
    pub async fn get_profile(&self) -> Result<Envelope<ProfileData>> {
        self.get(API_USER_INFO, &NoParams {}).await
    }

    /// 要求已登录，返回 token
    pub(crate) fn require_token(&self) -> Result<String> {
        self.token().ok_or(Error::NotLoggedIn)
    }

    /// 发送 GET 请求（有 token 时附带）
    pub(crate) async fn get<T, P>(&self, path: &str, params: &P) -> Result<Envelope<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let token = self.token();
        self.send(path, params, token.as_deref()).await
    }

    /// 发送需要登录的 GET 请求，未登录时不发送直接失败
    pub(crate) async fn get_authed<T, P>(&self, path: &str, params: &P) -> Result<Envelope<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let token = self.require_token()?;
        self.send(path, params, Some(&token)).await
    }

    async fn send<T, P>(&self, path: &str, params: &P, token: Option<&str>) -> Result<Envelope<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", path);

        let mut request = self.client.get(&url).query(params);
        if let Some(token) = token {
            request = request.query(&[("token", token)]);
        }

        let response = request.send().await?.error_for_status()?;
        let body = response.text().await?;

        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|source| {
            warn!("解析响应失败: path={}, 错误: {}", path, source);
            Error::Decode {
                endpoint: path.to_string(),
                source,
            }
        })?;

        if envelope.is_success() {
            debug!("GET {} 完成: status={}", path, envelope.status);
        } else {
            warn!(
                "GET {} 返回错误: status={}, details={:?}",
                path, envelope.status, envelope.details
            );
        }

        Ok(envelope)
    }

    /// 记录批量操作结果
    pub(crate) fn log_batch(operation: &str, envelope: &Envelope<BatchData>) {
        if let Some(data) = envelope.response() {
            let result = &data.result;
            if result.is_all_success() {
                info!("{}完成: 成功 {} 个", operation, result.success);
            } else {
                warn!(
                    "{}部分失败: 成功 {} 个, 失败 {} 个, 失败ID={:?}, 错误={:?}",
                    operation, result.success, result.fail, result.fail_ids, result.errors
                );
            }
        }
    }

    /// 内部 HTTP 客户端（上传数据时使用）
    pub(crate) fn http(&self) -> &Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_client() -> RapidgatorClient {
        // 不可达地址：若请求真的被发出会得到 Http 错误而不是前置条件错误
        RapidgatorClient::with_config("user", "pass", ClientConfig::with_base_url("http://127.0.0.1:9"))
            .unwrap()
    }

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(matches!(
            RapidgatorClient::new("", "secret"),
            Err(Error::EmptyUsername)
        ));
        assert!(matches!(
            RapidgatorClient::new("user", ""),
            Err(Error::EmptyPassword)
        ));
    }

    #[test]
    fn test_invalid_base_url() {
        let result =
            RapidgatorClient::with_config("user", "pass", ClientConfig::with_base_url("not a url"));
        assert!(matches!(result, Err(Error::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = RapidgatorClient::with_config(
            "user",
            "pass",
            ClientConfig::with_base_url("http://localhost:8080/"),
        )
        .unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_debug_hides_password() {
        let client = RapidgatorClient::new("user", "hunter2").unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("user"));
    }

    #[test]
    fn test_token_state() {
        let client = offline_client();
        assert!(!client.is_logged_in());
        assert!(matches!(client.require_token(), Err(Error::NotLoggedIn)));

        client.set_token("abc");
        assert_eq!(client.token().as_deref(), Some("abc"));

        // 克隆实例共享 token
        let cloned = client.clone();
        cloned.set_token("");
        assert!(!client.is_logged_in());
    }

    #[tokio::test]
    async fn test_authed_requests_fail_locally() {
        let client = offline_client();
        let result: Result<Envelope<ProfileData>> =
            client.get_authed(API_FILE_INFO, &NoParams {}).await;
        assert!(matches!(result, Err(Error::NotLoggedIn)));
    }
}
