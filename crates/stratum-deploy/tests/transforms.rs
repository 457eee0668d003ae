mod common;

use stratum_core::container::{Constraint, ContainerRequest, PropertyTypeKind};
use stratum_core::data_model::DataModelRequest;
use stratum_core::refs::ViewRef;
use stratum_core::view::ViewRequest;
use stratum_core::WriteResource;
use serde_json::json;

use stratum_core::ResourceKind;
use stratum_deploy::{
    build, ChangeKind, DeployError, DeployOptions, FieldChange, ModusOperandi, Plan,
    ResourceChange, SchemaPlan, Severity,
};

use common::{
    container, container_response, data_model, data_model_response, schema, snapshot, space,
    view, view_response,
};

fn empty_plan() -> SchemaPlan {
    SchemaPlan {
        spaces: Plan::empty(),
        containers: Plan::empty(),
        views: Plan::empty(),
        data_models: Plan::empty(),
    }
}

fn delete_entry<R: WriteResource>(resource: R) -> ResourceChange<R> {
    ResourceChange {
        reference: resource.reference(),
        new: None,
        current: Some(resource),
        changes: vec![],
        note: None,
    }
}

#[test]
fn consolidation_flips_deletes_to_unchanged() {
    let c = container("main", "person", &[("name", PropertyTypeKind::Text)]);
    let mut plan = empty_plan();
    plan.containers.resources.push(delete_entry(c.clone()));
    plan.data_models
        .resources
        .push(delete_entry(data_model("main", "crm", "1", vec![])));

    let plan = plan.consolidate().unwrap();
    assert_eq!(plan.containers.to_delete().count(), 0);
    assert_eq!(plan.data_models.to_delete().count(), 0);
    let entry = &plan.containers.resources[0];
    assert_eq!(entry.kind(), ChangeKind::Unchanged);
    assert_eq!(entry.new.as_ref(), Some(&c));
    assert!(!plan.has_changes());
}

#[test]
fn consolidation_restores_a_removed_constraint() {
    let mut current = container("main", "person", &[("email", PropertyTypeKind::Text)]);
    current.constraints.insert(
        "c1".to_string(),
        Constraint::Uniqueness { properties: vec!["email".to_string()] },
    );
    // Desired drops c1 entirely.
    let desired = schema(
        vec![],
        vec![container("main", "person", &[("email", PropertyTypeKind::Text)])],
        vec![],
        data_model("main", "crm", "1", vec![]),
    );
    let snap = snapshot(vec![], vec![container_response(&current)], vec![], vec![]);

    let plan = build::create_plan(&snap, &desired, &DeployOptions::default())
        .consolidate()
        .unwrap();
    let entry = &plan.containers.resources[0];
    // The removal was folded back in: nothing left to write.
    assert_eq!(entry.kind(), ChangeKind::Unchanged);
    assert!(entry.changes.is_empty());
    assert_eq!(
        entry.new.as_ref().unwrap().constraints.get("c1"),
        Some(&Constraint::Uniqueness { properties: vec!["email".to_string()] })
    );
    assert!(plan.containers.constraints_to_remove().is_empty());
}

#[test]
fn consolidation_keeps_matched_remove_add_pairs() {
    let mut current = container("main", "person", &[("email", PropertyTypeKind::Text)]);
    current.constraints.insert(
        "c1".to_string(),
        Constraint::Uniqueness { properties: vec!["email".to_string()] },
    );
    let mut desired_container = current.clone();
    let replacement = Constraint::Uniqueness {
        properties: vec!["email".to_string(), "name".to_string()],
    };
    desired_container
        .constraints
        .insert("c1".to_string(), replacement.clone());
    let desired = schema(
        vec![],
        vec![desired_container],
        vec![],
        data_model("main", "crm", "1", vec![]),
    );
    let snap = snapshot(vec![], vec![container_response(&current)], vec![], vec![]);

    let plan = build::create_plan(&snap, &desired, &DeployOptions::default())
        .consolidate()
        .unwrap();
    let entry = &plan.containers.resources[0];
    // A removal matched by an addition on the same path is a deliberate
    // replacement and survives consolidation.
    assert_eq!(entry.kind(), ChangeKind::Update);
    assert_eq!(entry.changes.len(), 2);
    assert_eq!(plan.containers.constraints_to_remove().len(), 1);
    assert_eq!(
        entry.new.as_ref().unwrap().constraints.get("c1"),
        Some(&replacement)
    );
}

#[test]
fn data_model_views_merge_additively() {
    let a = ViewRef::new("main", "Person", "v1");
    let b = ViewRef::new("main", "Company", "v1");
    let c = ViewRef::new("main", "Deal", "v1");
    let current = data_model("main", "crm", "1", vec![a.clone(), b.clone()]);
    let desired = schema(
        vec![],
        vec![],
        vec![],
        data_model("main", "crm", "1", vec![b.clone(), c.clone()]),
    );
    let snap = snapshot(vec![], vec![], vec![], vec![data_model_response(&current)]);

    let plan = build::create_plan(&snap, &desired, &DeployOptions::default());
    // Before consolidation this is breaking: `a` would be dropped.
    assert_eq!(plan.max_severity(), Severity::Breaking);

    let plan = plan.consolidate().unwrap();
    let entry = &plan.data_models.resources[0];
    assert_eq!(entry.kind(), ChangeKind::Update);
    // Current order first, new views appended.
    assert_eq!(entry.new.as_ref().unwrap().views, vec![a, b, c]);
    assert_eq!(entry.changes.len(), 1);
    assert_eq!(entry.changes[0].path(), "views");
    assert_eq!(entry.severity(), Severity::Safe);
}

#[test]
fn data_model_reorder_consolidates_to_unchanged() {
    let a = ViewRef::new("main", "Person", "v1");
    let b = ViewRef::new("main", "Company", "v1");
    let current = data_model("main", "crm", "1", vec![a.clone(), b.clone()]);
    let desired = schema(
        vec![],
        vec![],
        vec![],
        data_model("main", "crm", "1", vec![b, a]),
    );
    let snap = snapshot(vec![], vec![], vec![], vec![data_model_response(&current)]);

    let plan = build::create_plan(&snap, &desired, &DeployOptions::default())
        .consolidate()
        .unwrap();
    let entry = &plan.data_models.resources[0];
    // The merge adds nothing, so the pending write disappears.
    assert_eq!(entry.kind(), ChangeKind::Unchanged);
    assert_eq!(
        entry.new.as_ref().unwrap().views,
        entry.current.as_ref().unwrap().views
    );
}

#[test]
fn force_splits_a_breaking_view_update() {
    let current = view("main", "Person", "v1");
    let mut desired_view = current.clone();
    desired_view.filter = Some(serde_json::json!({"equals": {"value": 1}}));
    let desired = schema(
        vec![],
        vec![],
        vec![desired_view.clone()],
        data_model("main", "crm", "1", vec![desired_view.reference()]),
    );
    let snap = snapshot(vec![], vec![], vec![view_response(&current)], vec![]);

    let options = DeployOptions {
        modus_operandi: ModusOperandi::Rebuild,
        ..DeployOptions::default()
    };
    let plan = build::create_plan(&snap, &desired, &options)
        .force(options.drop_data)
        .unwrap();

    let deletes: Vec<&ResourceChange<ViewRequest>> = plan.views.to_delete().collect();
    let creates: Vec<&ResourceChange<ViewRequest>> = plan.views.to_create().collect();
    assert_eq!(deletes.len(), 1);
    assert_eq!(creates.len(), 1);
    assert_eq!(deletes[0].reference, creates[0].reference);
    assert_eq!(deletes[0].current.as_ref(), Some(&current));
    assert!(deletes[0].changes.is_empty());
    assert_eq!(creates[0].new.as_ref(), Some(&desired_view));
    // The original breaking change rides on the create half so the gate
    // still sees what forced the rebuild.
    assert_eq!(creates[0].severity(), Severity::Breaking);
    assert_eq!(plan.max_severity(), Severity::Breaking);
}

#[test]
fn force_without_drop_data_consolidates_containers() {
    let current = container(
        "main",
        "person",
        &[("name", PropertyTypeKind::Text), ("age", PropertyTypeKind::Int32)],
    );
    // Dropping `age` is breaking, but the container holds data.
    let desired = schema(
        vec![],
        vec![container("main", "person", &[("name", PropertyTypeKind::Text)])],
        vec![],
        data_model("main", "crm", "1", vec![]),
    );
    let snap = snapshot(vec![], vec![container_response(&current)], vec![], vec![]);

    let options = DeployOptions {
        modus_operandi: ModusOperandi::Rebuild,
        ..DeployOptions::default()
    };
    let plan = build::create_plan(&snap, &desired, &options)
        .force(false)
        .unwrap();
    assert_eq!(plan.containers.to_delete().count(), 0);
    let entry = &plan.containers.resources[0];
    assert_eq!(entry.kind(), ChangeKind::Unchanged);
    assert!(entry.new.as_ref().unwrap().properties.contains_key("age"));
}

#[test]
fn force_with_drop_data_rebuilds_containers() {
    let current = container(
        "main",
        "person",
        &[("name", PropertyTypeKind::Text), ("age", PropertyTypeKind::Int32)],
    );
    let desired_container = container("main", "person", &[("name", PropertyTypeKind::Text)]);
    let desired = schema(
        vec![],
        vec![desired_container.clone()],
        vec![],
        data_model("main", "crm", "1", vec![]),
    );
    let snap = snapshot(vec![], vec![container_response(&current)], vec![], vec![]);

    let options = DeployOptions {
        modus_operandi: ModusOperandi::Rebuild,
        drop_data: true,
        ..DeployOptions::default()
    };
    let plan = build::create_plan(&snap, &desired, &options)
        .force(true)
        .unwrap();

    let deletes: Vec<&ResourceChange<ContainerRequest>> = plan.containers.to_delete().collect();
    let creates: Vec<&ResourceChange<ContainerRequest>> = plan.containers.to_create().collect();
    assert_eq!(deletes.len(), 1);
    assert_eq!(creates.len(), 1);
    assert_eq!(creates[0].new.as_ref(), Some(&desired_container));
    assert!(!creates[0].new.as_ref().unwrap().properties.contains_key("age"));
}

#[test]
fn consolidation_rejects_removal_paths_spaces_cannot_carry() {
    let s = space("main");
    let mut plan = empty_plan();
    plan.spaces.resources.push(ResourceChange {
        reference: s.reference(),
        new: Some(s.clone()),
        current: Some(s),
        changes: vec![FieldChange::Removed {
            path: "bogus".to_string(),
            value: json!({}),
            severity: Severity::Warning,
        }],
        note: None,
    });

    let err = plan.consolidate().unwrap_err();
    assert!(matches!(
        err,
        DeployError::MalformedPath { kind: ResourceKind::Space, path } if path == "bogus"
    ));
}

#[test]
fn consolidation_requires_the_current_value_for_removals() {
    let c = container("main", "person", &[("name", PropertyTypeKind::Text)]);
    let mut plan = empty_plan();
    plan.containers.resources.push(ResourceChange {
        reference: c.reference(),
        new: Some(c),
        current: None,
        changes: vec![FieldChange::Removed {
            path: "properties.age".to_string(),
            value: json!({}),
            severity: Severity::Breaking,
        }],
        note: None,
    });

    let err = plan.consolidate().unwrap_err();
    assert!(matches!(
        err,
        DeployError::MissingCurrent { reference } if reference == "main:person"
    ));
}

#[test]
fn consolidation_rejects_unparsable_removed_values() {
    let c = container("main", "person", &[("name", PropertyTypeKind::Text)]);
    let mut plan = empty_plan();
    plan.containers.resources.push(ResourceChange {
        reference: c.reference(),
        new: Some(c.clone()),
        current: Some(c),
        // A bare number can never be a container property.
        changes: vec![FieldChange::Removed {
            path: "properties.age".to_string(),
            value: json!(42),
            severity: Severity::Breaking,
        }],
        note: None,
    });

    let err = plan.consolidate().unwrap_err();
    assert!(matches!(
        err,
        DeployError::InvalidRemovedValue { path, .. } if path == "properties.age"
    ));
}

#[test]
fn force_leaves_non_breaking_updates_alone() {
    let current = data_model("main", "crm", "1", vec![]);
    let mut desired_model = current.clone();
    desired_model.name = Some("CRM".to_string());
    let desired = schema(vec![], vec![], vec![], desired_model);
    let snap = snapshot(vec![], vec![], vec![], vec![data_model_response(&current)]);

    let options = DeployOptions {
        modus_operandi: ModusOperandi::Rebuild,
        ..DeployOptions::default()
    };
    let plan = build::create_plan(&snap, &desired, &options)
        .force(false)
        .unwrap();
    let entries: Vec<&ResourceChange<DataModelRequest>> =
        plan.data_models.resources.iter().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind(), ChangeKind::Update);
    assert_eq!(plan.data_models.to_delete().count(), 0);
}
