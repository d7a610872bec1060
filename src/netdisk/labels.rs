//! 枚举类型
//!
//! - 封闭枚举：[`FileMode`]、[`UploadState`]，线上以整数表示
//! - 开放枚举：服务器返回的文本标签，已知值之外保留原文 `Other(String)`

use serde::{Deserialize, Serialize};
use std::fmt;

// =====================================================
// 封闭枚举
// =====================================================

/// 文件/文件夹可见性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum FileMode {
    /// 公开
    Public = 0,
    /// 仅会员可下载
    PremiumOnly = 1,
    /// 私有
    Private = 2,
    /// 外链
    Hotlink = 3,
}

impl FileMode {
    /// 线上数值
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// 对应的服务器标签
    pub fn label(self) -> ModeLabel {
        match self {
            Self::Public => ModeLabel::Public,
            Self::PremiumOnly => ModeLabel::PremiumOnly,
            Self::Private => ModeLabel::Private,
            Self::Hotlink => ModeLabel::Hotlink,
        }
    }
}

impl TryFrom<u8> for FileMode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Public),
            1 => Ok(Self::PremiumOnly),
            2 => Ok(Self::Private),
            3 => Ok(Self::Hotlink),
            other => Err(format!("未知的文件模式: {}", other)),
        }
    }
}

impl From<FileMode> for u8 {
    fn from(mode: FileMode) -> Self {
        mode as u8
    }
}

/// 上传会话状态
///
/// 只会向前推进：Uploading -> Processing -> Done | Fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum UploadState {
    /// 等待上传数据
    Uploading = 0,
    /// 服务器处理中
    Processing = 1,
    /// 完成
    Done = 2,
    /// 失败
    Fail = 3,
}

impl UploadState {
    /// 是否已结束（成功或失败）
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Done | Self::Fail)
    }

    /// 是否成功
    pub fn is_success(self) -> bool {
        matches!(self, Self::Done)
    }

    /// 从当前状态能否推进到 `next`（相同状态视为合法的重复轮询结果）
    pub fn can_advance_to(self, next: UploadState) -> bool {
        match (self, next) {
            (a, b) if a == b => true,
            (Self::Uploading, _) => true,
            (Self::Processing, Self::Done | Self::Fail) => true,
            _ => false,
        }
    }
}

impl TryFrom<u8> for UploadState {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Uploading),
            1 => Ok(Self::Processing),
            2 => Ok(Self::Done),
            3 => Ok(Self::Fail),
            other => Err(format!("未知的上传状态: {}", other)),
        }
    }
}

impl From<UploadState> for u8 {
    fn from(state: UploadState) -> Self {
        state as u8
    }
}

// =====================================================
// 开放枚举
// =====================================================

/// 定义开放枚举：已知取值 + `Other(String)`，序列化为原始字符串
macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// 未知取值（原文保留）
            Other(String),
        }

        impl $name {
            /// 服务器原文
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $text, )+
                    Self::Other(s) => s.as_str(),
                }
            }

            /// 是否为已知取值
            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $( $text => Self::$variant, )+
                    _ => Self::Other(value),
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::from(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(s) => s,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

open_enum! {
    /// 可见性标签
    pub enum ModeLabel {
        Public => "Public",
        PremiumOnly => "Premium Only",
        Private => "Private",
        Hotlink => "Hotlink",
    }
}

open_enum! {
    /// 上传会话状态标签
    pub enum UploadStateLabel {
        Uploading => "Uploading",
        Processing => "Processing",
        Done => "Done",
        Fail => "Fail",
    }
}

open_enum! {
    /// 账户状态标签
    pub enum AccountStateLabel {
        Activated => "Activated",
    }
}

open_enum! {
    /// 一次性链接状态标签
    pub enum LinkStateLabel {
        Waiting => "Waiting",
    }
}

open_enum! {
    /// 链接检查结果
    pub enum LinkAccess {
        Access => "ACCESS",
        NoAccess => "NO ACCESS",
    }
}

open_enum! {
    /// 服务器返回的错误/提示信息（`details` 与批量操作的 `errors`）
    pub enum ApiMessage {
        LoginOrPasswordWrong => "Error: Login or password is wrong",
        InvalidAuthCode => "Error: Invalid auth code",
        LinkNotFound => "Error: Link not found",
        UserNotFound => "Error: User not found",
        FileNotFound => "Error: File not found",
        CopyFileFailed => "Error: Failed to copy the file",
        DeleteFileFailed => "Error: Failed to delete the file",
        MoveFileFailed => "Error: Failed to move the file",
        RenameFileFailed => "Error: Failed to rename file",
        TooManyCopies => "Error: You can't create more than 10 copies of the same file",
        ParentFolderNotFound => "Error: Parent folder not found",
        FolderNotFound => "Error: Folder not found",
        SessionNotExist => "Error: Session not exist",
    }
}

impl ApiMessage {
    /// 去掉 "Error: " 前缀后的文本
    pub fn text(&self) -> &str {
        let s = self.as_str();
        s.strip_prefix("Error: ").unwrap_or(s)
    }
}
