// 网盘API模块

pub mod client;
mod de;
pub mod file;
pub mod folder;
pub mod labels;
pub mod params;
pub mod types;
pub mod upload;

pub use client::RapidgatorClient;
pub use labels::*;
pub use params::{
    FileRef, FolderContentOptions, IdList, Multipart, OneTimeLinkOptions, SortColumn,
    SortDirection,
};
pub use types::*;
pub use upload::{UploadRequest, UploadSource};
