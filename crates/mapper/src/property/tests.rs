use std::any::TypeId;

use super::*;
use crate::Properties;

#[derive(Debug, Default)]
struct Manual {
	label: String,
	count: u32,
}

impl Properties for Manual {
	fn properties() -> &'static [Property<Self>] {
		static PROPERTIES: [Property<Manual>; 2] = [
			Property::new(
				"label",
				TypeId::of::<String>,
				std::any::type_name::<String>,
				|this: &Manual| PropertyValue::new(this.label.clone()),
				|this: &mut Manual, value: PropertyValue| {
					this.label = value.downcast()?;
					Ok(())
				},
			),
			Property::read_only(
				"count",
				TypeId::of::<u32>,
				std::any::type_name::<u32>,
				|this: &Manual| PropertyValue::new(this.count),
			),
		];
		&PROPERTIES
	}
}

#[derive(Debug, Default, Properties)]
struct Derived {
	title: String,
	#[property(rename = "pages")]
	page_count: u16,
	#[property(skip)]
	#[allow(dead_code)]
	scratch: Vec<u8>,
	#[property(read_only)]
	id: u64,
	r#type: bool,
}

#[test]
fn manual_table_lookup() {
	let label = Manual::property("label").expect("label exists");
	assert_eq!(label.name(), "label");
	assert_eq!(label.value_type(), TypeId::of::<String>());
	assert!(label.is_writable());
	assert!(Manual::property("missing").is_none());
}

#[test]
fn read_clones_current_value() {
	let manual = Manual {
		label: "first".into(),
		count: 3,
	};
	let value = Manual::property("label").unwrap().read(&manual);
	assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("first"));
	assert_eq!(manual.label, "first");
}

#[test]
fn write_replaces_value() {
	let mut manual = Manual::default();
	let label = Manual::property("label").unwrap();
	assert!(label.write(&mut manual, PropertyValue::new(String::from("new"))).is_ok());
	assert_eq!(manual.label, "new");
}

#[test]
fn write_hands_back_mismatched_value() {
	let mut manual = Manual::default();
	let label = Manual::property("label").unwrap();
	let rejected = label
		.write(&mut manual, PropertyValue::new(7_i32))
		.expect_err("i32 is not a String");
	assert!(rejected.is::<i32>());
	assert_eq!(rejected.type_name(), "i32");
	assert!(manual.label.is_empty());
}

#[test]
fn read_only_rejects_writes() {
	let mut manual = Manual::default();
	let count = Manual::property("count").unwrap();
	assert!(!count.is_writable());
	let rejected = count.write(&mut manual, PropertyValue::new(9_u32));
	assert!(rejected.is_err());
	assert_eq!(manual.count, 0);
}

#[test]
fn derived_table_follows_declaration_order() {
	let names: Vec<_> = Derived::properties().iter().map(|p| p.name()).collect();
	assert_eq!(names, ["title", "pages", "id", "type"]);
}

#[test]
fn derived_attributes() {
	assert!(Derived::property("page_count").is_none());
	assert!(Derived::property("scratch").is_none());
	assert_eq!(
		Derived::property("pages").unwrap().value_type(),
		TypeId::of::<u16>()
	);
	assert!(!Derived::property("id").unwrap().is_writable());
	assert!(Derived::property("type").unwrap().is_writable());
}

#[test]
fn derived_handles_carry_property_names() {
	assert_eq!(Derived::TITLE.name(), "title");
	assert_eq!(Derived::PAGE_COUNT.name(), "pages");
	assert_eq!(Derived::TYPE.name(), "type");
}

#[test]
fn derived_round_trip_through_descriptor() {
	let source = Derived {
		title: "Dune".into(),
		page_count: 412,
		scratch: vec![1],
		id: 5,
		r#type: true,
	};
	let mut target = Derived::default();
	for property in Derived::properties().iter().filter(|p| p.is_writable()) {
		assert!(property.write(&mut target, property.read(&source)).is_ok());
	}
	assert_eq!(target.title, "Dune");
	assert_eq!(target.page_count, 412);
	assert!(target.r#type);
	assert_eq!(target.id, 0);
	assert!(target.scratch.is_empty());
}

#[test]
fn same_type_across_owners() {
	let label = Manual::property("label").unwrap();
	let title = Derived::property("title").unwrap();
	let pages = Derived::property("pages").unwrap();
	assert!(label.has_same_type(title));
	assert!(!label.has_same_type(pages));
}

mod ledger {
	use crate::Properties;

	#[derive(Debug, Default, Properties)]
	pub struct Entry {
		pub amount: i64,
		memo: String,
	}

	impl Entry {
		pub fn memo_handle() -> &'static str {
			Self::MEMO.name()
		}
	}
}

#[test]
fn handles_follow_field_visibility() {
	assert_eq!(ledger::Entry::AMOUNT.name(), "amount");
	assert_eq!(ledger::Entry::memo_handle(), "memo");
	let names: Vec<_> = ledger::Entry::properties().iter().map(|p| p.name()).collect();
	assert_eq!(names, ["amount", "memo"]);
}
