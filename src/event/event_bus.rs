// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broadcast channel behind [`SectorHub::subscribe`](crate::SectorHub::subscribe).

use tokio::sync::broadcast;

use super::HubEvent;

/// Sending half of the hub's event channel.
///
/// A subscriber more than `capacity` events behind loses the oldest ones
/// and sees `RecvError::Lagged` on its next receive.
#[derive(Debug)]
pub(crate) struct EventBus {
    sender: broadcast::Sender<HubEvent>,
}

impl EventBus {
    /// Creates the channel. A capacity of zero is raised to one.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<HubEvent> {
        self.sender.subscribe()
    }

    /// Sends `event` to current subscribers; dropped when there are none.
    pub(crate) fn publish(&self, event: HubEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!("No event subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Resource;

    #[test]
    fn zero_capacity_is_usable() {
        let bus = EventBus::with_capacity(0);
        let mut rx = bus.subscribe();

        bus.publish(HubEvent::Ready);
        assert!(matches!(rx.try_recv(), Ok(HubEvent::Ready)));
    }

    #[test]
    fn publish_without_subscribers_is_dropped() {
        let bus = EventBus::with_capacity(4);
        bus.publish(HubEvent::Ready);

        let mut rx = bus.subscribe();
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn every_subscriber_gets_a_copy() {
        let bus = EventBus::with_capacity(4);
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.publish(HubEvent::Refreshed {
            failed: vec![Resource::Temperatures],
        });

        for rx in [&mut first, &mut second] {
            let event = rx.recv().await.unwrap();
            assert!(matches!(
                event,
                HubEvent::Refreshed { failed } if failed == [Resource::Temperatures]
            ));
        }
    }

    #[test]
    fn slow_subscriber_lags() {
        let bus = EventBus::with_capacity(1);
        let mut rx = bus.subscribe();

        bus.publish(HubEvent::Ready);
        bus.publish(HubEvent::Refreshed { failed: vec![] });

        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Lagged(1))
        ));
        assert!(matches!(rx.try_recv(), Ok(HubEvent::Refreshed { .. })));
    }
}
