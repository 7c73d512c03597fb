//! End-to-end pipeline tests: decode → background removal → sizing →
//! adjustments → print layout → export, on synthetic photos.

use photoid::config::ProvidersConfig;
use photoid::export;
use photoid::layout::{render_layout, PrintLayoutSpec};
use photoid::removal::{remove_background, BackgroundProvider, ProviderError, ProviderRegistry};
use photoid::sizing;
use photoid::{AdjustmentParams, Bitmap, EditSession};

/// A light-gray studio backdrop with a dark subject block, encoded as a
/// real PNG so the test exercises the decode path.
fn synthetic_photo_png() -> Vec<u8> {
    let mut photo = Bitmap::filled(120, 160, [225, 225, 225, 255]);
    for y in 40..150 {
        for x in 35..85 {
            photo.set(x, y, [70, 55, 45, 255]);
        }
    }
    export::to_png_bytes(&photo).unwrap()
}

#[test]
fn full_pipeline_from_upload_to_print_sheet() {
    // Upload: decode the incoming bytes once.
    let photo = Bitmap::decode(&synthetic_photo_png()).unwrap();
    let mut session = EditSession::new(photo);

    // Background: local chroma key, then a white studio backdrop.
    let cut_out = photoid::remove_background_by_color(session.base());
    assert_eq!(cut_out.get(0, 0)[3], 0, "backdrop should be keyed out");
    session.commit_image(cut_out.over_background([255, 255, 255, 255]));

    // Sizing: standard passport dimensions.
    let passport = sizing::resize_to_preset(session.base(), &sizing::SIZE_PRESETS[0]);
    session.commit_image(passport);
    assert_eq!(session.base().width(), 413);
    assert_eq!(session.base().height(), 531);

    // Adjustments: preview then commit.
    session.set_params(AdjustmentParams {
        brightness: 10.0,
        contrast: 15.0,
        sharpness: 30.0,
        ..Default::default()
    });
    while !session.tick() {}
    session.commit();
    assert!(session.params().is_identity());

    // Layout: a default 4x6" sheet of six copies.
    let page = render_layout(session.base(), &PrintLayoutSpec::default());
    assert_eq!(page.width(), 1200);
    assert_eq!(page.height(), 1800);
    assert_eq!(page.get(0, 0), [0, 0, 0, 255], "page border");

    // Export: all three formats produce plausible bytes.
    let png = export::to_png_bytes(&page).unwrap();
    assert_eq!(&png[1..4], b"PNG");

    let jpeg = export::to_jpeg_bytes(&page, 95).unwrap();
    assert_eq!(&jpeg[..2], [0xFF, 0xD8]);

    let pdf = export::to_pdf_document(&page, 4.0, 6.0).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

/// Provider that serves a canned cut-out without any network.
struct CannedProvider {
    name: &'static str,
    fail_with: Option<u16>,
}

impl BackgroundProvider for CannedProvider {
    fn name(&self) -> &str {
        self.name
    }

    fn remove(&self, _image: &[u8]) -> Result<Vec<u8>, ProviderError> {
        match self.fail_with {
            Some(status) => Err(ProviderError::Http {
                provider: self.name.to_string(),
                status,
                body: "no more credits".to_string(),
            }),
            None => export::to_png_bytes(&Bitmap::filled(6, 8, [1, 2, 3, 0])).map_err(|e| {
                ProviderError::Http {
                    provider: self.name.to_string(),
                    status: 500,
                    body: e.to_string(),
                }
            }),
        }
    }
}

#[test]
fn remote_removal_falls_back_across_providers_and_sticks() {
    let photo = Bitmap::decode(&synthetic_photo_png()).unwrap();
    let mut registry = ProviderRegistry::from_providers(vec![
        Box::new(CannedProvider {
            name: "Primary",
            fail_with: Some(402),
        }),
        Box::new(CannedProvider {
            name: "Secondary",
            fail_with: None,
        }),
    ]);

    let mut progress = Vec::new();
    let outcome = remove_background(&mut registry, &photo, |msg, name| {
        progress.push(format!("{msg} [{name}]"))
    })
    .unwrap();

    assert_eq!(outcome.provider, "Secondary");
    assert_eq!(registry.cursor(), 1);
    assert_eq!(
        progress,
        vec![
            "Trying Primary... [Primary]".to_string(),
            "Trying Secondary... [Secondary]".to_string(),
        ]
    );

    // The winner's payload becomes the working image.
    assert_eq!(outcome.image.width(), 6);
    assert_eq!(outcome.image.height(), 8);

    // A second run starts directly at the sticky provider.
    let mut tried = Vec::new();
    remove_background(&mut registry, &photo, |_, name| tried.push(name.to_string())).unwrap();
    assert_eq!(tried, vec!["Secondary"]);
}

#[test]
fn config_documents_become_working_registries() {
    let config = ProvidersConfig::from_toml_str(
        r#"
        [[providers]]
        name = "Clipdrop #1"
        endpoint = "https://clipdrop.example/v1"
        credential = "key"
        "#,
    )
    .unwrap();

    let registry = config.build_registry().unwrap();
    assert_eq!(registry.names(), vec!["Clipdrop #1"]);
    assert_eq!(registry.current_provider(), Some("Clipdrop #1"));
}

#[test]
fn failed_tools_never_touch_committed_state() {
    let photo = Bitmap::decode(&synthetic_photo_png()).unwrap();
    let session = EditSession::new(photo.clone());

    let mut registry = ProviderRegistry::new();
    let result = remove_background(&mut registry, session.base(), |_, _| {});
    assert!(result.is_err());

    // The session still holds the original image, fully intact.
    assert_eq!(session.base(), &photo);
    assert!(session.preview().is_none());
}
