// SPDX-License-Identifier: MPL-2.0
//! The process-wide store is set once per binary, so everything touching it
//! lives in a single test.

use toast_dispatch::notifications::{Container, NotificationType, Store, TextRenderer};
use toast_dispatch::toast;

#[test]
fn facade_writes_into_installed_store() {
    let installed = Store::new();
    toast::install(installed.clone()).expect("first install succeeds");
    assert!(toast::install(Store::new()).is_err());

    // Callers far from any UI only need the facade.
    fn save_invoice() {
        toast::success("Invoice saved");
    }
    fn sync_failed() {
        toast::error("Sync failed");
    }
    save_invoice();
    sync_failed();
    let info = toast::info("New version available");
    toast::warning("Disk almost full");

    let kinds: Vec<_> = installed.snapshot().iter().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            NotificationType::Success,
            NotificationType::Error,
            NotificationType::Info,
            NotificationType::Warning,
        ]
    );

    let container = Container::global();
    assert!(container.dismiss(info));
    assert_eq!(
        container.view(&mut TextRenderer::new()),
        vec![
            "✔ [success] Invoice saved",
            "✖ [error] Sync failed",
            "⚠ [warning] Disk almost full",
        ]
    );
    assert_eq!(installed.len(), 3);
}
