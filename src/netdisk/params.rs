// 请求参数
//
// 公开的选项类型 + 各接口的查询参数结构（字段名即线上参数名）

use super::labels::FileMode;
use serde::Serialize;

// =====================================================
// ID 列表
// =====================================================

/// 一个或多个 ID
///
/// 多个 ID 以逗号拼接为单个参数，单个 ID 原样传递
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdList {
    One(String),
    Many(Vec<String>),
}

impl IdList {
    /// 线上参数值
    pub fn to_param(&self) -> String {
        match self {
            Self::One(id) => id.clone(),
            Self::Many(ids) => ids.join(","),
        }
    }

    /// 展开为 ID 列表
    pub fn ids(&self) -> Vec<&str> {
        match self {
            Self::One(id) => vec![id.as_str()],
            Self::Many(ids) => ids.iter().map(String::as_str).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(ids) => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for IdList {
    fn from(id: &str) -> Self {
        Self::One(id.to_string())
    }
}

impl From<String> for IdList {
    fn from(id: String) -> Self {
        Self::One(id)
    }
}

impl From<&String> for IdList {
    fn from(id: &String) -> Self {
        Self::One(id.clone())
    }
}

impl From<Vec<String>> for IdList {
    fn from(ids: Vec<String>) -> Self {
        Self::Many(ids)
    }
}

impl From<Vec<&str>> for IdList {
    fn from(ids: Vec<&str>) -> Self {
        Self::Many(ids.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for IdList {
    fn from(ids: &[&str]) -> Self {
        Self::Many(ids.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for IdList {
    fn from(ids: [&str; N]) -> Self {
        Self::Many(ids.iter().map(|s| s.to_string()).collect())
    }
}

impl From<&[String]> for IdList {
    fn from(ids: &[String]) -> Self {
        Self::Many(ids.to_vec())
    }
}

// =====================================================
// 文件 ID 或链接
// =====================================================

/// 文件引用：下载链接或文件 ID
///
/// 以 `http` 开头的视为链接
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileRef {
    Url(String),
    Id(String),
}

impl FileRef {
    pub fn parse(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.starts_with("http") {
            Self::Url(value)
        } else {
            Self::Id(value)
        }
    }
}

// =====================================================
// 选项
// =====================================================

/// 文件夹内容排序字段（默认 name）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Created,
    Size,
    Name,
    NbDownloads,
}

/// 排序方向（默认 ASC）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

/// 文件夹内容查询选项，未设置的字段不发送
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FolderContentOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,

    #[serde(rename = "per_page", skip_serializing_if = "Option::is_none")]
    pub files_per_page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_column: Option<SortColumn>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
}

impl FolderContentOptions {
    pub fn folder(folder_id: impl Into<String>) -> Self {
        Self {
            folder_id: Some(folder_id.into()),
            ..Self::default()
        }
    }

    pub fn page(mut self, page: u32, files_per_page: u32) -> Self {
        self.page = Some(page);
        self.files_per_page = Some(files_per_page);
        self
    }

    pub fn sort(mut self, column: SortColumn, direction: SortDirection) -> Self {
        self.sort_column = Some(column);
        self.sort_direction = Some(direction);
        self
    }
}

/// 一次性链接选项
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OneTimeLinkOptions {
    /// 回调地址
    pub url: Option<String>,
    /// 下载后是否通知
    pub notify: Option<bool>,
}

/// 上传时的 multipart 标志（布尔值或服务器约定的字符串）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Multipart {
    Enabled(bool),
    Value(String),
}

impl From<bool> for Multipart {
    fn from(v: bool) -> Self {
        Self::Enabled(v)
    }
}

impl From<&str> for Multipart {
    fn from(v: &str) -> Self {
        Self::Value(v.to_string())
    }
}

impl Multipart {
    /// `false` 与空字符串不发送
    pub(crate) fn is_set(&self) -> bool {
        match self {
            Self::Enabled(v) => *v,
            Self::Value(v) => !v.is_empty(),
        }
    }
}

// =====================================================
// 线上参数
// =====================================================

#[derive(Debug, Serialize)]
pub(crate) struct LoginParams<'a> {
    pub login: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UploadParams<'a> {
    pub name: &'a str,
    pub hash: &'a str,
    pub size: u64,
    pub folder_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multipart: Option<&'a Multipart>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UploadIdParams<'a> {
    pub upload_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UrlParams<'a> {
    pub url: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct FileIdParams<'a> {
    pub file_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct OneTimeLinkCreateParams<'a> {
    pub file_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify: Option<bool>,
}

#[derive(Debug, Serialize)]
pub(crate) struct OneTimeLinkInfoParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FileRenameParams<'a> {
    pub file_id: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct FileModeParams<'a> {
    pub file_id: &'a str,
    pub mode: FileMode,
}

#[derive(Debug, Serialize)]
pub(crate) struct FileTransferParams<'a> {
    pub file_id: &'a str,
    pub folder_id_dest: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct FileXcopyParams<'a> {
    pub folder_id_dest: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'a str>,
}

impl<'a> FileXcopyParams<'a> {
    pub fn new(file: &'a FileRef, folder_id_dest: &'a str) -> Self {
        match file {
            FileRef::Url(url) => Self {
                folder_id_dest,
                file_id: None,
                url: Some(url),
            },
            FileRef::Id(id) => Self {
                folder_id_dest,
                file_id: Some(id),
                url: None,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct HashCopyParams<'a> {
    pub hash: &'a str,
    pub name: &'a str,
    pub folder_id_dest: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct OptionalFolderIdParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FolderCreateParams<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FolderIdParams<'a> {
    pub folder_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct FolderRenameParams<'a> {
    pub folder_id: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct FolderTransferParams<'a> {
    pub folder_id: &'a str,
    pub folder_id_dest: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct FolderModeParams<'a> {
    pub folder_id: &'a str,
    pub mode: FileMode,
}
