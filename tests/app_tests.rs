use std::path::Path;

use qrsnap::{
    controller::{ExportStatus, MainController, State, DOWNLOAD_SUCCESSFUL},
    error::AppError,
    platform::{DesktopPlatform, PermissionStatus, ShareAction, PNG_MIME_TYPE},
    storage::load_png,
    QrEncoder,
};

fn main_screen(root: &Path, permission: PermissionStatus) -> MainController<DesktopPlatform> {
    let platform = DesktopPlatform::new(
        Some(root.join("Download")),
        Some(root.join("Pictures")),
        "com.app.qrcodegenerator.fileprovider",
        permission,
    );
    MainController::new(QrEncoder::new(), platform, "QRCode.png")
}

#[test]
fn test_generate_export_share() {
    let tmp = tempfile::tempdir().unwrap();
    let mut main = main_screen(tmp.path(), PermissionStatus::Granted);

    let img = main.generate("https://example.com").unwrap();
    assert_eq!(img.dimensions(), (400, 400));
    assert!(img.is_two_tone());
    assert_eq!(main.state(), State::Ready);
    assert!(main.view().export_enabled && main.view().share_enabled);

    let saved = match main.export().unwrap() {
        ExportStatus::Saved(path) => path,
        status => panic!("Unexpected export status {status:?}"),
    };
    assert_eq!(saved, tmp.path().join("Download").join("QRCode.png"));
    assert_eq!(main.dialog().map(|d| d.message.as_str()), Some(DOWNLOAD_SUCCESSFUL));
    assert_eq!(main.platform().registered_media(), [saved.clone()]);
    main.dismiss_dialog();

    let share = main.share().unwrap();
    assert_eq!(share.action, ShareAction::Send);
    assert_eq!(share.mime_type, PNG_MIME_TYPE);
    assert!(share.grant_read);
    assert_eq!(share.stream.authority(), Some("com.app.qrcodegenerator.fileprovider"));
    assert!(main.dialog().is_none());

    // The shared file is the same picture as the downloaded one
    let shared = main.platform().file_provider().resolve(&share.stream).unwrap();
    assert_eq!(shared, tmp.path().join("Pictures").join("QRCode.png"));
    let img = main.image().unwrap();
    assert!(img.same_pixels(&load_png(&saved).unwrap()));
    assert!(img.same_pixels(&load_png(&shared).unwrap()));
}

#[test]
fn test_export_after_permission_grant() {
    let tmp = tempfile::tempdir().unwrap();
    let mut main = main_screen(tmp.path(), PermissionStatus::Prompt);
    main.generate("hello").unwrap();

    assert_eq!(main.export().unwrap(), ExportStatus::AwaitingPermission);
    assert_eq!(main.platform().permission_requests(), 1);
    assert!(!tmp.path().join("Download").join("QRCode.png").exists());

    let saved = main.on_permission_result(true).unwrap().unwrap();
    assert!(saved.exists());

    // Granted once, later exports go straight through
    main.dismiss_dialog();
    main.generate("hello again").unwrap();
    assert_eq!(main.export().unwrap(), ExportStatus::Saved(saved));
    assert_eq!(main.platform().permission_requests(), 1);
}

#[test]
fn test_nothing_generated() {
    let tmp = tempfile::tempdir().unwrap();
    let mut main = main_screen(tmp.path(), PermissionStatus::Granted);

    assert!(matches!(main.generate(""), Err(AppError::EmptyInput)));
    assert_eq!(main.dialog().unwrap().message, "Please Enter Any Text or Link");
    main.dismiss_dialog();

    assert!(main.export().is_err());
    assert_eq!(main.dialog().unwrap().message, "No QR Code Generated To Save.");
    main.dismiss_dialog();

    assert!(main.share().is_err());
    assert_eq!(main.dialog().unwrap().message, "No QR Code generated to share.");
    assert_eq!(main.state(), State::Idle);
    assert!(main.platform().shares().is_empty());
    assert!(!tmp.path().join("Download").exists());
}

mod encoder_proptests {
    use proptest::prelude::*;
    use qrsnap::QrEncoder;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn proptest_fixed_size_two_tone(text in "\\PC{1,200}") {
            let img = QrEncoder::new().encode(&text).unwrap();
            prop_assert_eq!(img.dimensions(), (400, 400));
            prop_assert!(img.is_two_tone());
        }
    }
}
