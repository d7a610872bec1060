// 客户端错误类型
//
// 分三类：
// - 本地前置条件失败（不会发出任何请求）
// - 传输层失败（网络错误、非 2xx 状态、响应体无法解析）
// - 业务层失败（包含在 200 响应的 details / errors 中，作为数据返回，不在此处）

use thiserror::Error;

/// 客户端结果类型
pub type Result<T> = std::result::Result<T, Error>;

/// Rapidgator 客户端错误
#[derive(Debug, Error)]
pub enum Error {
    /// 用户名为空
    #[error("用户名不能为空")]
    EmptyUsername,

    /// 密码为空
    #[error("密码不能为空")]
    EmptyPassword,

    /// 名称为空（上传文件名、文件夹名、重命名目标）
    #[error("名称不能为空")]
    EmptyName,

    /// 上传时既没有内存数据也没有文件路径
    #[error("上传数据和文件路径不能同时为空")]
    MissingDataSource,

    /// 尚未登录（没有 token）
    #[error("尚未登录，请先调用 login()")]
    NotLoggedIn,

    /// base_url 无法解析
    #[error("无效的 base_url: {0}")]
    InvalidBaseUrl(String),

    /// 网络错误或非 2xx 状态
    #[error("HTTP 请求失败: {0}")]
    Http(#[from] reqwest::Error),

    /// 响应体不是预期的 JSON 结构
    #[error("解析响应失败 ({endpoint}): {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// 读取本地文件失败（计算哈希或读取上传数据时）
    #[error("读取本地文件失败: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// 是否为本地前置条件错误（请求未发出）
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Error::EmptyUsername
                | Error::EmptyPassword
                | Error::EmptyName
                | Error::MissingDataSource
                | Error::NotLoggedIn
        )
    }

    /// 传输层返回的 HTTP 状态码（如有）
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Error::Http(e) => e.status(),
            _ => None,
        }
    }
}
