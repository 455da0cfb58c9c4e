//! Integration tests for `DieselWiringDiagramRepository` against embedded PostgreSQL.

use backend::domain::ports::{CatalogueRepository, WiringDiagramRepository};
use backend::domain::{DiagramFilter, DiagramUpload, NewBrand, NewWiringDiagram};
use backend::outbound::persistence::{DieselCatalogueRepository, DieselWiringDiagramRepository};
use rstest::{fixture, rstest};

mod support;

use support::{TestDatabase, handle_cluster_setup_failure, provision_database};

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

struct Context {
    db: TestDatabase,
    diagrams: DieselWiringDiagramRepository,
    brand_id: i32,
}

#[fixture]
fn context() -> Option<Context> {
    let setup = provision_database("wiring_repo").and_then(|db| {
        let catalogue = DieselCatalogueRepository::new(db.pool.clone());
        let brand = db
            .block_on(catalogue.create_brand(&NewBrand {
                name: "EZGO".to_owned(),
                ..NewBrand::default()
            }))
            .map_err(|err| err.to_string())?;
        Ok(Context {
            diagrams: DieselWiringDiagramRepository::new(db.pool.clone()),
            db,
            brand_id: brand.id,
        })
    });
    match setup {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn uploaded_images_survive_storage(context: Option<Context>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: uploaded_images_survive_storage skipped");
        return;
    };
    let diagram = NewWiringDiagram {
        brand_id: Some(ctx.brand_id),
        title: "RXV controller harness".to_owned(),
        tags: vec!["controller".to_owned()],
        ..NewWiringDiagram::default()
    }
    .with_upload(DiagramUpload {
        bytes: PNG_MAGIC.to_vec(),
        file_name: Some("rxv.png".to_owned()),
        mime_type: Some("image/png".to_owned()),
    });

    let created = ctx.db.block_on(ctx.diagrams.create(&diagram)).expect("create");
    let fetched = ctx
        .db
        .block_on(ctx.diagrams.find(created.id))
        .expect("find")
        .expect("diagram exists");

    assert_eq!(fetched, created);
    assert_eq!(fetched.file_size, Some(8));
    assert!(!fetched.is_custom_drawing);
    let image = fetched.image().expect("valid base64").expect("inline image");
    assert_eq!(image.bytes, PNG_MAGIC);
    assert_eq!(image.mime_type, "image/png");
}

#[rstest]
fn diagrams_filter_by_brand(context: Option<Context>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: diagrams_filter_by_brand skipped");
        return;
    };
    let branded = ctx
        .db
        .block_on(ctx.diagrams.create(&NewWiringDiagram {
            brand_id: Some(ctx.brand_id),
            title: "Headlight kit".to_owned(),
            image_url: Some("https://example.com/headlights.png".to_owned()),
            ..NewWiringDiagram::default()
        }))
        .expect("create");
    ctx.db
        .block_on(ctx.diagrams.create(&NewWiringDiagram {
            title: "Generic 48V layout".to_owned(),
            is_custom_drawing: true,
            ..NewWiringDiagram::default()
        }))
        .expect("create");

    let all = ctx
        .db
        .block_on(ctx.diagrams.list(&DiagramFilter::default()))
        .expect("list");
    assert_eq!(all.len(), 2);

    let filtered = ctx
        .db
        .block_on(ctx.diagrams.list(&DiagramFilter {
            brand_id: Some(ctx.brand_id),
            model_id: None,
        }))
        .expect("list");
    assert_eq!(filtered, vec![branded.clone()]);
    assert!(branded.image().expect("no inline data").is_none());
}
