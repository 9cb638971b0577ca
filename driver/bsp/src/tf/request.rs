//! 请求适配：总线层 MmcReq → 控制器原生命令/数据描述
//!
//! 下发顺序：主命令（可带数据阶段）→ stop 命令（与主命令结果无关，总是下发）→ req_complete。
//! 每条命令的错误码只作为数据写回 `MmcCmd::err`，不向上传播。

use mmc::{MmcCmd, MmcData, MmcHost, MmcReq};

use super::host::HostState;
use super::ops::{NativeBuf, NativeCmd, NativeData, SunxiMmc};
use super::resp::{data_flags, resp_flags};

/// 一次请求的执行结果（各命令的原生返回码）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOutcome {
    pub cmd_err: i32,
    pub stop_err: Option<i32>,
}

impl RequestOutcome {
    pub fn is_ok(&self) -> bool {
        self.cmd_err == 0 && self.stop_err.map_or(true, |e| e == 0)
    }
}

fn native_cmd(cmd: &MmcCmd) -> NativeCmd {
    NativeCmd {
        cmdidx: cmd.cmd_code,
        resp_type: resp_flags(cmd.resp_type),
        cmdarg: cmd.arg,
        response: [0; 4],
    }
}

/// 只写方向时借出只读源缓冲，其余情况（读/双向/无方向）借出可写目的缓冲
fn native_data<'b>(data: &'b mut MmcData<'_>) -> NativeData<'b> {
    let dir = data.dir();
    let buf = if dir.writes() && !dir.reads() {
        NativeBuf::Src(&*data.buf)
    } else {
        NativeBuf::Dest(&mut *data.buf)
    };
    NativeData {
        buf,
        flags: data_flags(dir),
        blocks: data.blks,
        blocksize: data.blksize,
    }
}

impl<C: SunxiMmc> HostState<C> {
    /// 下发一条命令并记账，返回原生返回码
    fn issue(&self, cmd: &mut MmcCmd, data: Option<&mut MmcData<'_>>) -> i32 {
        let mut ncmd = native_cmd(cmd);
        let status = match data {
            Some(data) => {
                let mut ndata = native_data(data);
                self.controller().send_cmd(&mut ncmd, Some(&mut ndata))
            }
            None => self.controller().send_cmd(&mut ncmd, None),
        };
        cmd.err = status;
        if status == 0 {
            cmd.resp = ncmd.response;
        } else {
            log::debug!(
                target: "bsp::tf",
                "CMD{} failed: status={} err_count={}",
                cmd.cmd_code,
                status,
                self.err_count() + 1
            );
        }
        self.account(status);
        status
    }

    /// 执行一次总线请求；无论成败都恰好调用一次 `host.req_complete()`
    pub fn execute(&self, host: &dyn MmcHost, req: &mut MmcReq<'_>) -> RequestOutcome {
        let cmd_err = self.issue(&mut req.cmd, req.data.as_mut());
        let stop_err = req.stop.as_mut().map(|stop| self.issue(stop, None));
        host.req_complete();
        RequestOutcome { cmd_err, stop_err }
    }
}
