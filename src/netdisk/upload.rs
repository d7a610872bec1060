// 上传
//
// 流程：协商（hash + size）-> 秒传命中则结束，否则向返回的地址发送数据 -> 轮询会话状态

use super::client::*;
use super::params::{Multipart, UploadIdParams, UploadParams};
use super::{Envelope, UploadData};
use crate::error::{Error, Result};
use crate::hash::ContentHash;
use reqwest::multipart::{Form, Part};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 上传数据来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    /// 内存数据
    Bytes(Vec<u8>),
    /// 本地文件
    Path(PathBuf),
}

/// 上传请求
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    name: String,
    source: Option<UploadSource>,
    folder_id: Option<String>,
    multipart: Option<Multipart>,
}

impl UploadRequest {
    /// 只指定名称，数据来源稍后通过 [`data`](Self::data) 或 [`path`](Self::path) 设置
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// 上传内存数据
    pub fn from_bytes(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self::new(name).data(data)
    }

    /// 上传本地文件，名称取文件名
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(name).path(path)
    }

    /// 设置内存数据（替换之前的来源）
    pub fn data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.source = Some(UploadSource::Bytes(data.into()));
        self
    }

    /// 设置本地文件（替换之前的来源）
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(UploadSource::Path(path.into()));
        self
    }

    /// 覆盖上传名称
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// 目标文件夹（默认取配置中的 `default_folder_id`）
    pub fn folder(mut self, folder_id: impl Into<String>) -> Self {
        self.folder_id = Some(folder_id.into());
        self
    }

    /// multipart 标志
    pub fn multipart(mut self, multipart: impl Into<Multipart>) -> Self {
        self.multipart = Some(multipart.into());
        self
    }

    pub fn file_name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> Option<&UploadSource> {
        self.source.as_ref()
    }

    pub fn folder_id(&self) -> Option<&str> {
        self.folder_id.as_deref()
    }

    /// 检查名称与数据来源
    fn validate(&self) -> Result<&UploadSource> {
        if self.name.is_empty() {
            return Err(Error::EmptyName);
        }
        self.source.as_ref().ok_or(Error::MissingDataSource)
    }
}

impl RapidgatorClient {
    /// 协商上传
    ///
    /// 计算内容 MD5 与大小后请求上传会话。服务器已有相同内容时会话直接为 Done，
    /// 否则返回的 `url` 用于 [`upload_data`](Self::upload_data)
    pub async fn upload(&self, request: &UploadRequest) -> Result<Envelope<UploadData>> {
        let source = request.validate()?;
        self.require_token()?;

        let hash = match source {
            UploadSource::Bytes(data) => ContentHash::from_bytes(data),
            UploadSource::Path(path) => ContentHash::from_path(path).await?,
        };

        self.negotiate(request, &hash).await
    }

    /// 查询上传会话状态，轮询节奏由调用方决定
    pub async fn get_upload_session_state(&self, upload_id: &str) -> Result<Envelope<UploadData>> {
        debug!("查询上传状态: upload_id={}", upload_id);
        self.get_authed(API_FILE_UPLOAD_INFO, &UploadIdParams { upload_id })
            .await
    }

    /// 向协商返回的地址发送完整文件（单个 multipart POST）
    pub async fn upload_data(&self, upload_url: &str, name: &str, data: Vec<u8>) -> Result<()> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }

        let size = data.len();
        info!("发送上传数据: name={}, size={}", name, size);

        let part = Part::bytes(data).file_name(name.to_string());
        let form = Form::new().part("file", part);

        self.http()
            .post(upload_url)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        info!("上传数据发送完成: name={}, size={}", name, size);
        Ok(())
    }

    /// 协商并在需要时发送数据
    ///
    /// 返回协商得到的会话；秒传命中时不发送数据。之后可用
    /// [`get_upload_session_state`](Self::get_upload_session_state) 跟踪处理进度
    pub async fn upload_and_send(&self, request: UploadRequest) -> Result<Envelope<UploadData>> {
        let source = request.validate()?;
        self.require_token()?;

        let data = match source {
            UploadSource::Bytes(data) => data.clone(),
            UploadSource::Path(path) => read_file(path).await?,
        };
        let hash = ContentHash::from_bytes(&data);

        let envelope = self.negotiate(&request, &hash).await?;

        let Some(session) = envelope.response().map(|d| &d.upload) else {
            return Ok(envelope);
        };

        if session.is_instant() {
            info!("秒传成功: name={}, upload_id={}", request.name, session.upload_id);
        } else if session.needs_data() {
            if let Some(url) = session.url.as_deref() {
                self.upload_data(url, &request.name, data).await?;
            }
        } else {
            warn!(
                "上传会话状态异常: upload_id={}, state={:?}",
                session.upload_id, session.state
            );
        }

        Ok(envelope)
    }

    async fn negotiate(
        &self,
        request: &UploadRequest,
        hash: &ContentHash,
    ) -> Result<Envelope<UploadData>> {
        let folder_id = request
            .folder_id
            .as_deref()
            .unwrap_or(&self.config().default_folder_id);

        info!(
            "协商上传: name={}, size={}, md5={}, folder_id={}",
            request.name, hash.size, hash.md5, folder_id
        );

        let params = UploadParams {
            name: &request.name,
            hash: &hash.md5,
            size: hash.size,
            folder_id,
            multipart: request.multipart.as_ref().filter(|m| m.is_set()),
        };
        self.get_authed(API_FILE_UPLOAD, &params).await
    }
}

async fn read_file(path: &Path) -> Result<Vec<u8>> {
    Ok(tokio::fs::read(path).await?)
}
