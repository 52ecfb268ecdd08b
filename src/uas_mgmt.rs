use crate::err::Dot3Error;
use crate::dot3::UserInfo;
use crate::UAS_MGMT_TICK;
use log::{debug, error};
use parking_lot::Mutex;
use std::sync::{
    mpsc::{self, RecvTimeoutError},
    Arc,
};
use std::thread;
use std::time::Instant;

enum MgmtMessage {
    Terminate,
}

/// Worker thread that periodically expires UAS entries & updates their
/// availability.
///
/// The thread is stopped & joined when the [`UasMgmt`] is stopped or dropped.
pub(crate) struct UasMgmt {
    sender: mpsc::Sender<MgmtMessage>,
    worker: Option<thread::JoinHandle<()>>,
}

impl UasMgmt {
    /// Starts the worker. Every `interval` x 100 ms the user tables are
    /// locked & the UAS table is updated.
    pub fn start(user: Arc<Mutex<UserInfo>>, interval: u32) -> Result<UasMgmt, Dot3Error> {
        let period = UAS_MGMT_TICK * interval;
        let (sender, recv) = mpsc::channel();

        let worker = thread::Builder::new()
            .name("dot3-uas-mgmt".to_string())
            .spawn(move || {
                debug!("UAS management started ({:?} interval)", period);
                let mut next = Instant::now() + period;
                loop {
                    let timeout = next.saturating_duration_since(Instant::now());
                    match recv.recv_timeout(timeout) {
                        Err(RecvTimeoutError::Timeout) => {
                            let now = Instant::now();
                            user.lock().uas.tick(now, interval);
                            next += period;
                            if next < now {
                                // fell behind (e.g. suspended), do not catch up
                                next = now + period;
                            }
                        }
                        Ok(MgmtMessage::Terminate) | Err(RecvTimeoutError::Disconnected) => {
                            debug!("UAS management stopped");
                            break;
                        }
                    }
                }
            })
            .map_err(Dot3Error::TimerSpawn)?;

        Ok(UasMgmt {
            sender,
            worker: Some(worker),
        })
    }

    fn terminate(&mut self) {
        if let Some(worker) = self.worker.take() {
            // a failed send means the worker already exited
            let _ = self.sender.send(MgmtMessage::Terminate);
            if worker.join().is_err() {
                error!("UAS management thread panicked");
            }
        }
    }

    /// Stops the worker & waits for it to finish.
    pub fn stop(mut self) {
        self.terminate();
    }
}

impl core::fmt::Debug for UasMgmt {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UasMgmt")
            .field("running", &self.worker.is_some())
            .finish()
    }
}

impl Drop for UasMgmt {
    fn drop(&mut self) {
        self.terminate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uas::ReceivedService;
    use crate::*;
    use std::time::Duration;

    #[test]
    fn expires_entries() {
        let user = Arc::new(Mutex::new(UserInfo::new()));
        let header = WsaHeader::new(0, 0);
        let wsi = ServiceInfo::new(0x20, 1);
        let wci = ChannelInfo::new(17, 172);
        let rx = WsaRxParams {
            src_mac_addr: [0x02, 0, 0, 0, 0, 1],
            wsa_type: WsaType::Unsecured,
            rcpi: 0,
            tx_lat: 0,
            tx_lon: 0,
            tx_elev: 0,
        };
        user.lock()
            .uas
            .add_or_update(
                &ReceivedService {
                    wsa: &[1],
                    rx: &rx,
                    header: &header,
                    wsi: &wsi,
                    wci: &wci,
                    wra: None,
                },
                Instant::now(),
                Duration::from_millis(50),
            )
            .unwrap();

        let mgmt = UasMgmt::start(user.clone(), 1).unwrap();
        let deadline = Instant::now() + Duration::from_secs(10);
        while 0 != user.lock().uas.len() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(20));
        }
        mgmt.stop();
        assert_eq!(0, user.lock().uas.len());
    }

    #[test]
    fn drop_joins_worker() {
        let user = Arc::new(Mutex::new(UserInfo::new()));
        {
            let _mgmt = UasMgmt::start(user.clone(), 100).unwrap();
        }
        // the worker held the only other reference
        assert_eq!(1, Arc::strong_count(&user));
    }
}
