// 网盘API数据类型

use super::de;
use super::labels::{
    AccountStateLabel, ApiMessage, FileMode, LinkAccess, LinkStateLabel, ModeLabel, UploadState,
    UploadStateLabel,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

// =====================================================
// 响应外壳
// =====================================================

/// 所有接口的统一响应格式 `{ response, status, details }`
///
/// 业务错误时 `response` 通常为 null，原因在 `details` 中
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// 业务数据
    #[serde(default = "Option::default")]
    pub response: Option<T>,

    /// 状态码（200 成功，401 未授权...）
    pub status: u16,

    /// 错误说明
    #[serde(default)]
    pub details: Option<ApiMessage>,
}

impl<T> Envelope<T> {
    /// 是否成功
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// 是否未授权（token 无效或缺失）
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// 业务数据引用
    pub fn response(&self) -> Option<&T> {
        self.response.as_ref()
    }

    /// 取出业务数据
    pub fn into_response(self) -> Option<T> {
        self.response
    }
}

// =====================================================
// 用户
// =====================================================

/// 流量配额
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrafficQuota {
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub total: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub left: Option<u64>,
}

/// 存储配额（服务器可能返回数字字符串）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageQuota {
    #[serde(default, deserialize_with = "de::u64_lenient")]
    pub total: u64,
    #[serde(default, deserialize_with = "de::u64_lenient")]
    pub left: u64,
}

impl StorageQuota {
    /// 已用空间
    pub fn used(&self) -> u64 {
        self.total.saturating_sub(self.left)
    }
}

/// 上传限制
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadLimits {
    /// 单文件最大字节数
    #[serde(default, deserialize_with = "de::u64_lenient")]
    pub max_file_size: u64,
    /// 并发上传通道数
    #[serde(default, deserialize_with = "de::u64_lenient")]
    pub nb_pipes: u64,
}

/// 远程上传限制
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteUploadLimits {
    #[serde(default, deserialize_with = "de::u64_lenient")]
    pub max_nb_jobs: u64,
    #[serde(default, deserialize_with = "de::u64_lenient")]
    pub refresh_time: u64,
}

/// 用户信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,

    #[serde(default)]
    pub is_premium: bool,

    /// 会员到期时间
    #[serde(default, deserialize_with = "de::opt_string_lenient")]
    pub premium_end_time: Option<String>,

    #[serde(default, deserialize_with = "de::u64_lenient")]
    pub state: u64,

    #[serde(default)]
    pub state_label: Option<AccountStateLabel>,

    #[serde(default)]
    pub traffic: TrafficQuota,

    #[serde(default)]
    pub storage: StorageQuota,

    #[serde(default)]
    pub upload: UploadLimits,

    #[serde(default)]
    pub remote_upload: RemoteUploadLimits,
}

/// 登录响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub user: UserProfile,
}

/// 用户信息响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileData {
    pub user: UserProfile,
}

// =====================================================
// 文件 / 文件夹
// =====================================================

/// 文件信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileItem {
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub file_id: String,

    #[serde(default, deserialize_with = "de::string_lenient")]
    pub folder_id: String,

    #[serde(default)]
    pub mode: Option<FileMode>,

    #[serde(default)]
    pub mode_label: Option<ModeLabel>,

    #[serde(default)]
    pub name: String,

    /// 内容 MD5
    #[serde(default)]
    pub hash: String,

    #[serde(default, deserialize_with = "de::u64_lenient")]
    pub size: u64,

    /// 创建时间戳（秒）
    #[serde(default)]
    pub created: i64,

    #[serde(default)]
    pub url: String,
}

/// 文件夹信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolderItem {
    #[serde(default, deserialize_with = "de::string_lenient")]
    pub folder_id: String,

    #[serde(default)]
    pub mode: Option<FileMode>,

    #[serde(default)]
    pub mode_label: Option<ModeLabel>,

    /// 根目录为 None
    #[serde(default, deserialize_with = "de::opt_string_lenient")]
    pub parent_folder_id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub url: String,

    /// 子文件夹数量
    #[serde(default, deserialize_with = "de::u64_lenient")]
    pub nb_folders: u64,

    /// 文件数量
    #[serde(default, deserialize_with = "de::u64_lenient")]
    pub nb_files: u64,

    /// 文件总大小
    #[serde(default, deserialize_with = "de::u64_lenient")]
    pub size_files: u64,

    #[serde(default)]
    pub created: i64,

    /// 子文件夹（folder/info、folder/content 返回）
    #[serde(default)]
    pub folders: Vec<FolderItem>,

    /// 文件（仅 folder/content 返回）
    #[serde(default)]
    pub files: Vec<FileItem>,
}

impl FolderItem {
    /// 是否为根目录
    pub fn is_root(&self) -> bool {
        self.parent_folder_id.is_none()
    }

    /// 按名称查找直接子文件夹
    pub fn find_subfolder(&self, name: &str) -> Option<&FolderItem> {
        self.folders.iter().find(|f| f.name == name)
    }
}

/// 单个文件响应（file/info、rename、change_mode、xcopy、hashcopy）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileData {
    pub file: FileItem,
}

/// 单个文件夹响应（folder/info、create、rename、change_mode）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderData {
    pub folder: FolderItem,
}

/// 分页信息
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Pager {
    #[serde(default, deserialize_with = "de::u64_lenient")]
    pub current: u64,
    #[serde(default, deserialize_with = "de::u64_lenient")]
    pub total: u64,
}

impl Pager {
    /// 是否还有下一页
    pub fn has_next(&self) -> bool {
        self.current < self.total
    }
}

/// 文件夹内容响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderContentData {
    pub folder: FolderItem,
    #[serde(default)]
    pub pager: Pager,
}

// =====================================================
// 批量操作结果
// =====================================================

/// 批量操作结果（删除/复制/移动）
///
/// 部分失败时由调用方自行处理，客户端不重试也不回滚
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchResult {
    #[serde(default, deserialize_with = "de::u64_lenient")]
    pub success: u64,

    #[serde(default)]
    pub success_ids: Vec<String>,

    #[serde(default, deserialize_with = "de::u64_lenient")]
    pub fail: u64,

    #[serde(default)]
    pub fail_ids: Vec<String>,

    #[serde(default)]
    pub errors: Vec<ApiMessage>,
}

impl BatchResult {
    /// 处理的条目总数
    pub fn total(&self) -> u64 {
        self.success + self.fail
    }

    /// 是否全部成功
    pub fn is_all_success(&self) -> bool {
        self.fail == 0 && self.fail_ids.is_empty()
    }

    /// 检查结果是否恰好划分了请求的 ID 集合：
    /// 计数与列表一致、成功/失败无交集、并集等于请求集合
    pub fn partitions<S: AsRef<str>>(&self, requested: &[S]) -> bool {
        let requested: HashSet<&str> = requested.iter().map(|s| s.as_ref()).collect();
        let ok: HashSet<&str> = self.success_ids.iter().map(String::as_str).collect();
        let failed: HashSet<&str> = self.fail_ids.iter().map(String::as_str).collect();

        self.success as usize == self.success_ids.len()
            && self.fail as usize == self.fail_ids.len()
            && ok.len() == self.success_ids.len()
            && failed.len() == self.fail_ids.len()
            && ok.is_disjoint(&failed)
            && self.total() as usize == requested.len()
            && ok.union(&failed).copied().collect::<HashSet<_>>() == requested
    }

    /// 是否包含指定错误
    pub fn has_error(&self, message: &ApiMessage) -> bool {
        self.errors.contains(message)
    }
}

/// 批量操作响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchData {
    pub result: BatchResult,
}

// =====================================================
// 链接
// =====================================================

/// 链接检查结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkCheck {
    pub url: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub size: Option<u64>,
    pub status: LinkAccess,
}

impl LinkCheck {
    /// 链接是否可访问
    pub fn is_accessible(&self) -> bool {
        self.status == LinkAccess::Access
    }
}

/// 一次性下载链接
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneTimeLink {
    #[serde(deserialize_with = "de::string_lenient")]
    pub link_id: String,

    #[serde(default)]
    pub file: FileItem,

    #[serde(default)]
    pub url: String,

    #[serde(default, deserialize_with = "de::string_lenient")]
    pub state: String,

    #[serde(default)]
    pub state_label: Option<LinkStateLabel>,

    #[serde(default)]
    pub callback_url: Option<String>,

    #[serde(default)]
    pub notify: bool,

    #[serde(default)]
    pub created: i64,

    #[serde(default)]
    pub downloaded: bool,
}

/// 创建一次性链接响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneTimeLinkData {
    pub link: OneTimeLink,
}

/// 一次性链接查询条目：链接或 `{link_id, error}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneTimeLinkEntry {
    Missing {
        #[serde(deserialize_with = "de::string_lenient")]
        link_id: String,
        error: ApiMessage,
    },
    Link(OneTimeLink),
}

impl OneTimeLinkEntry {
    /// 链接 ID
    pub fn link_id(&self) -> &str {
        match self {
            Self::Missing { link_id, .. } => link_id,
            Self::Link(link) => &link.link_id,
        }
    }

    /// 存在时返回链接
    pub fn as_link(&self) -> Option<&OneTimeLink> {
        match self {
            Self::Link(link) => Some(link),
            Self::Missing { .. } => None,
        }
    }
}

/// 一次性链接查询响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneTimeLinksData {
    #[serde(default)]
    pub links: Vec<OneTimeLinkEntry>,
}

/// 下载链接响应
///
/// 链接在 `delay` 秒后才生效，客户端不做等待
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadLink {
    pub download_url: String,
    #[serde(default, deserialize_with = "de::u64_lenient")]
    pub delay: u64,
}

impl DownloadLink {
    /// 链接生效前需要等待的时间
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay)
    }
}

// =====================================================
// 上传会话
// =====================================================

/// 上传会话
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadSession {
    #[serde(deserialize_with = "de::string_lenient")]
    pub upload_id: String,

    /// 上传数据的目标地址（秒传成功时可能为空）
    #[serde(default)]
    pub url: Option<String>,

    /// 关联文件（秒传或处理完成后才有）
    #[serde(default, deserialize_with = "de::one_or_many")]
    pub file: Vec<FileItem>,

    pub state: UploadState,

    #[serde(default)]
    pub state_label: Option<UploadStateLabel>,
}

impl UploadSession {
    /// 服务器已有相同内容，无需再发送数据
    pub fn is_instant(&self) -> bool {
        self.state.is_success()
    }

    /// 还需要发送数据
    pub fn needs_data(&self) -> bool {
        self.state == UploadState::Uploading
            && self.url.as_deref().map_or(false, |u| !u.is_empty())
    }
}

/// 上传会话响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadData {
    pub upload: UploadSession,
}
