//! # dfs：文件系统挂载接口
//!
//! host 驱动只需要挂载/卸载：卡就绪后把块设备挂到挂载点，卡被移除时卸载。
//! 文件系统本身（elm-FAT 等）由平台提供。

#![cfg_attr(not(test), no_std)]

/// 一次挂载所需的参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountPoint {
    /// 块设备名，如 "sd0"
    pub device: &'static str,
    /// 挂载路径，如 "/mmc"
    pub path: &'static str,
    /// 文件系统驱动名，如 "elm"
    pub fs_type: &'static str,
    pub rwflag: u32,
}

impl MountPoint {
    pub const fn new(device: &'static str, path: &'static str, fs_type: &'static str) -> Self {
        Self {
            device,
            path,
            fs_type,
            rwflag: 0,
        }
    }
}

/// 文件系统层
///
/// 返回的错误码为负 errno；挂载/卸载可能阻塞在底层存储 I/O 上。
pub trait Dfs: Send + Sync {
    fn mount(&self, device: &str, path: &str, fs_type: &str, rwflag: u32) -> Result<(), i32>;

    fn unmount(&self, path: &str) -> Result<(), i32>;

    /// 按 `MountPoint` 挂载
    fn mount_at(&self, mp: &MountPoint) -> Result<(), i32> {
        self.mount(mp.device, mp.path, mp.fs_type, mp.rwflag)
    }
}
