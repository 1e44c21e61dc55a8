// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Integration tests for the mapper module.

use crate::contract::{ContractKind, ContractSet, InterfaceBuilder, SimpleKind, TypeRef};
use crate::error::MapperError;
use crate::instance::{Decimal, MessageValue};
use crate::mapper::{MessageMapper, NameResolver};
use std::sync::Arc;
use uuid::Uuid;

fn order_contracts() -> ContractSet {
    let mut set = ContractSet::new();
    set.add(
        InterfaceBuilder::new("shop.orders", "IOrderLine")
            .property("sku", TypeRef::Simple(SimpleKind::String))
            .property("quantity", TypeRef::Simple(SimpleKind::U32))
            .build(),
    );
    set.add(
        InterfaceBuilder::new("shop.orders", "IOrder")
            .property("id", TypeRef::Simple(SimpleKind::Uuid))
            .property("total", TypeRef::Simple(SimpleKind::Decimal))
            .property("item", TypeRef::named("shop.orders.IOrderLine"))
            .build(),
    );
    set
}

fn initialized_mapper() -> MessageMapper {
    let mut mapper = MessageMapper::new(order_contracts());
    mapper
        .initialize(vec![TypeRef::named("shop.orders.IOrder")])
        .expect("initialize");
    mapper
}

#[test]
fn test_empty_initialize_is_noop() {
    let mut mapper = MessageMapper::new(ContractSet::new());
    mapper.initialize(Vec::new()).expect("empty is a no-op");
    assert!(mapper.registry().is_empty());
}

#[test]
fn test_bijection_round_trip() {
    let mapper = initialized_mapper();
    let iface = TypeRef::named("shop.orders.IOrder");

    let concrete = mapper.mapped_type_for(&iface).expect("concrete mapping");
    assert_eq!(concrete, TypeRef::named("shop.orders.IOrder__impl"));

    // And back: the concrete type resolves to the interface it supports.
    assert_eq!(mapper.mapped_type_for(&concrete), Some(iface.clone()));

    // The synthesized type declares the interface as implemented.
    let concrete_def = mapper
        .registry()
        .resolve_concrete("shop.orders.IOrder")
        .expect("concrete def");
    match &concrete_def.kind {
        ContractKind::Class {
            implements,
            has_default_ctor,
            sealed,
            ..
        } => {
            assert!(implements.contains(&iface));
            assert!(*has_default_ctor);
            assert!(*sealed);
        }
        other => panic!("synthesized type is not a class: {other:?}"),
    }
}

#[test]
fn test_lookups_are_shareable_across_worker_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MessageMapper>();

    let mapper = Arc::new(initialized_mapper());
    let workers: Vec<_> = (0..4)
        .map(|_| {
            let mapper = mapper.clone();
            std::thread::spawn(move || {
                for _ in 0..50 {
                    // Concurrent reads, including lazy canonical-name
                    // memoization, must agree.
                    assert!(mapper
                        .mapped_type_for(&TypeRef::named("shop.orders.IOrder"))
                        .is_some());
                    assert!(mapper
                        .mapped_type_for_name("shop.orders.IOrder__impl")
                        .is_some());
                    assert!(mapper
                        .create_instance(&TypeRef::named("shop.orders.IOrderLine"))
                        .is_ok());
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker thread");
    }
}

#[test]
fn test_mapped_type_for_name_strips_suffix() {
    let mapper = initialized_mapper();
    let by_plain = mapper.mapped_type_for_name("shop.orders.IOrder");
    let by_suffixed = mapper.mapped_type_for_name("shop.orders.IOrder__impl");
    assert!(by_plain.is_some());
    assert_eq!(by_plain, by_suffixed);
}

#[test]
fn test_name_miss_falls_back_to_resolver() {
    struct WellKnown;
    impl NameResolver for WellKnown {
        fn resolve(&self, name: &str) -> Option<TypeRef> {
            (name == "wellknown.IPing").then(|| TypeRef::named("wellknown.IPing"))
        }
    }

    let mut mapper =
        MessageMapper::new(order_contracts()).with_fallback_resolver(Box::new(WellKnown));
    mapper
        .initialize(vec![TypeRef::named("shop.orders.IOrder")])
        .expect("initialize");

    // Stripping happens before the fallback sees the name.
    assert_eq!(
        mapper.mapped_type_for_name("wellknown.IPing__impl"),
        Some(TypeRef::named("wellknown.IPing"))
    );
    assert_eq!(mapper.mapped_type_for_name("wellknown.INope"), None);
}

#[test]
fn test_end_to_end_order_scenario() {
    let mapper = initialized_mapper();

    // Both interfaces got concrete registrations.
    assert!(mapper.registry().resolve_concrete("shop.orders.IOrder").is_some());
    assert!(mapper
        .registry()
        .resolve_concrete("shop.orders.IOrderLine")
        .is_some());

    let mut order = mapper
        .create_instance(&TypeRef::named("shop.orders.IOrder"))
        .expect("create order");
    assert_eq!(order.type_name(), "shop.orders.IOrder__impl");

    // Accessors are independently settable and gettable.
    let id = Uuid::new_v4();
    order.set("id", id).expect("set id");
    order.set("total", "19.99".parse::<Decimal>().unwrap()).expect("set total");
    assert_eq!(order.get::<Uuid>("id").expect("get id"), id);
    assert_eq!(
        order.get::<Decimal>("total").expect("get total"),
        Decimal::new(1999, 2)
    );

    // The nested contract satisfies the same contract recursively.
    let mut line = mapper
        .create_instance(&TypeRef::named("shop.orders.IOrderLine"))
        .expect("create line");
    line.set("sku", "SKU-1").expect("set sku");
    line.set("quantity", 3u32).expect("set quantity");
    order
        .set("item", line.into_value())
        .expect("set item");

    let item = order.get_field("item").expect("get item");
    assert_eq!(
        item.as_struct().and_then(|f| f.get("sku")).and_then(MessageValue::as_str),
        Some("SKU-1")
    );
}

#[test]
fn test_create_instance_with_applies_setup() {
    let mapper = initialized_mapper();
    let order = mapper
        .create_instance_with(&TypeRef::named("shop.orders.IOrder"), |order| {
            order.set("total", Decimal::new(500, 2)).expect("set total");
        })
        .expect("create");
    assert_eq!(order.get::<Decimal>("total").unwrap(), Decimal::new(500, 2));
}

#[test]
fn test_unset_reference_slot_is_null() {
    let mapper = initialized_mapper();
    let order = mapper
        .create_instance(&TypeRef::named("shop.orders.IOrder"))
        .expect("create");
    assert!(order.get_field("item").expect("item slot").is_null());
}

#[test]
fn test_method_interface_yields_missing_mapping() {
    let mut set = order_contracts();
    set.add(
        InterfaceBuilder::new("shop.orders", "ICallback")
            .method("invoke")
            .build(),
    );
    let mut mapper = MessageMapper::new(set);
    mapper
        .initialize(vec![
            TypeRef::named("shop.orders.IOrder"),
            TypeRef::named("shop.orders.ICallback"),
        ])
        .expect("initialize degrades, does not fail");

    // The skip is observable...
    let unmapped: Vec<_> = mapper.unmapped_interfaces().collect();
    assert_eq!(unmapped, ["shop.orders.ICallback"]);
    assert_eq!(
        mapper.mapped_type_for(&TypeRef::named("shop.orders.ICallback")),
        None
    );

    // ...and later use fails with a missing-mapping error.
    let err = mapper
        .create_instance(&TypeRef::named("shop.orders.ICallback"))
        .unwrap_err();
    assert_eq!(
        err,
        MapperError::NoMappingFound {
            type_name: "shop.orders.ICallback".into()
        }
    );
}

#[test]
fn test_generic_definition_never_resolves() {
    let mut set = order_contracts();
    set.add(
        InterfaceBuilder::new("shop.orders", "IHolder")
            .generic_param("T")
            .property("value", TypeRef::Param("T".into()))
            .build(),
    );
    let mut mapper = MessageMapper::new(set);
    mapper
        .initialize(vec![TypeRef::named("shop.orders.IHolder")])
        .expect("open generic roots are skipped");
    assert_eq!(
        mapper.mapped_type_for(&TypeRef::named("shop.orders.IHolder")),
        None
    );
}

#[test]
fn test_bound_generic_round_trip() {
    let mut set = order_contracts();
    set.add(
        InterfaceBuilder::new("shop.orders", "IHolder")
            .generic_param("T")
            .property("value", TypeRef::Param("T".into()))
            .build(),
    );
    let holder = TypeRef::instance(
        "shop.orders.IHolder",
        vec![TypeRef::named("shop.orders.IOrderLine")],
    );
    let mut mapper = MessageMapper::new(set);
    mapper.initialize(vec![holder.clone()]).expect("initialize");

    let concrete = mapper.mapped_type_for(&holder).expect("mapped");
    assert_eq!(concrete, TypeRef::named("IHolderOfIOrderLine__impl"));
    assert_eq!(mapper.mapped_type_for(&concrete), Some(holder));

    // The flattened name is a usable wire tag.
    assert!(mapper.mapped_type_for_name("IHolderOfIOrderLine").is_some());
}

#[test]
fn test_marker_interface_synthesizes_empty_proxy() {
    let mut set = ContractSet::new();
    set.add(InterfaceBuilder::new("bus", "IMessage").build());
    set.add(
        InterfaceBuilder::new("bus", "IShipped")
            .extends("bus.IMessage")
            .property("when", TypeRef::Simple(SimpleKind::Timestamp))
            .build(),
    );
    let mut mapper = MessageMapper::new(set);
    mapper
        .initialize(vec![TypeRef::named("bus.IShipped")])
        .expect("initialize");

    // The marker base got its own (empty) proxy via hierarchy flattening.
    let marker = mapper.registry().resolve_concrete("bus.IMessage").expect("marker mapping");
    assert!(marker.properties.is_empty());

    let shipped = mapper.registry().resolve_concrete("bus.IShipped").expect("mapping");
    assert_eq!(shipped.properties.len(), 1);
}

#[test]
fn test_plain_class_maps_to_itself() {
    let mut set = order_contracts();
    set.add(
        crate::contract::ClassBuilder::new("shop.orders", "Audit")
            .property("note", TypeRef::Simple(SimpleKind::String))
            .build(),
    );
    let mut mapper = MessageMapper::new(set);
    mapper
        .initialize(vec![TypeRef::named("shop.orders.Audit")])
        .expect("initialize");
    let audit = TypeRef::named("shop.orders.Audit");
    assert_eq!(mapper.mapped_type_for(&audit), Some(audit.clone()));
}

#[test]
fn test_default_ctor_applies_declared_defaults() {
    let mut set = ContractSet::new();
    set.add(
        crate::contract::ClassBuilder::new("shop", "Counter")
            .property_with_default("count", TypeRef::Simple(SimpleKind::I32), "42")
            .build(),
    );
    set.add(
        crate::contract::ClassBuilder::new("shop", "RawCounter")
            .no_default_ctor()
            .property_with_default("count", TypeRef::Simple(SimpleKind::I32), "42")
            .build(),
    );
    let mut mapper = MessageMapper::new(set);
    mapper
        .initialize(vec![
            TypeRef::named("shop.Counter"),
            TypeRef::named("shop.RawCounter"),
        ])
        .expect("initialize");

    // Constructor path runs declared defaults.
    let counter = mapper.create_instance(&TypeRef::named("shop.Counter")).unwrap();
    assert_eq!(counter.get::<i32>("count").unwrap(), 42);

    // Uninitialized allocation runs none: language-zero values only.
    let raw = mapper.create_instance(&TypeRef::named("shop.RawCounter")).unwrap();
    assert_eq!(raw.get::<i32>("count").unwrap(), 0);
}

#[test]
fn test_instance_creation_by_concrete_name() {
    let mapper = initialized_mapper();
    let inst = mapper
        .create_instance(&TypeRef::named("shop.orders.IOrder__impl"))
        .expect("create by proxy name");
    assert_eq!(inst.type_name(), "shop.orders.IOrder__impl");
}
