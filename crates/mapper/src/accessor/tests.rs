use rstest::rstest;

use super::*;
use crate::Properties;

#[derive(Debug, Default, Properties)]
struct Order {
	id: u64,
	total: f64,
}

#[rstest]
#[case("id", "id")]
#[case("  total  ", "total")]
#[case("|o| o.id", "id")]
#[case("|o: &Order| o.total", "total")]
#[case("move |o| o.id", "id")]
#[case("o => o.total", "total")]
#[case("(o) => o.id", "id")]
#[case("(|o| o.id)", "id")]
#[case("|o| (o.id)", "id")]
#[case("|o| { o.id }", "id")]
#[case("|o| &o.id", "id")]
#[case("|o| o.id.clone()", "id")]
#[case("|o| o.total.into()", "total")]
#[case("|o| Box::new(o.total)", "total")]
#[case("o => Some(o.id)", "id")]
#[case("o => Box::new(o.id) as Box<dyn Any>", "id")]
#[case("|o| o.id as u128", "id")]
#[case("r#id", "id")]
fn accepts_direct_member_access(#[case] expression: &str, #[case] expected: &str) {
	let name = parse_accessor(expression).expect("accessor should resolve");
	assert_eq!(name, Some(expected));
}

#[rstest]
#[case("o.id")]
#[case("|o| o")]
#[case("|o| other.id")]
#[case("|| o.id")]
#[case("|o| o.customer.id")]
#[case("|o| o.id + 1")]
#[case("|o| o.id as u64 + 1")]
#[case("|o| o.items[0]")]
#[case("|o| o.total()")]
#[case("|o| (o.id)(o.total)")]
#[case("1 + 2")]
#[case("_")]
#[case("9lives")]
fn rejects_everything_else(#[case] expression: &str) {
	let err = parse_accessor(expression).expect_err("accessor should be rejected");
	match err {
		MapError::InvalidAccessor { expression: reported } => assert_eq!(reported, expression),
		other => panic!("unexpected error: {other}"),
	}
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_is_absent(#[case] expression: &str) {
	assert!(parse_accessor(expression).unwrap().is_none());
	assert!(Accessor::<Order>::resolve(expression).unwrap().is_none());
}

#[test]
fn string_accessor_resolves_descriptor() {
	let property = Accessor::<Order>::resolve("|o| o.total").unwrap().unwrap();
	assert_eq!(property.name(), "total");
	let owned = Accessor::<Order>::resolve(String::from("id")).unwrap().unwrap();
	assert_eq!(owned.name(), "id");
}

#[test]
fn unknown_property_names_type_and_property() {
	let err = Accessor::<Order>::resolve("|o| o.discount").unwrap_err();
	match &err {
		MapError::UnknownProperty { type_name, property } => {
			assert!(type_name.ends_with("Order"));
			assert_eq!(property, "discount");
		}
		other => panic!("unexpected error: {other}"),
	}
	assert!(err.to_string().contains("discount"));
}

#[test]
fn field_handle_resolves() {
	let property = Order::TOTAL.resolve().unwrap().unwrap();
	assert_eq!(property.name(), "total");
	assert_eq!(format!("{:?}", Order::ID), "Field(\"id\")");
}

#[test]
fn field_handle_with_unknown_name_is_rejected() {
	let bogus: Field<Order, u64> = Field::new("missing");
	assert!(matches!(
		bogus.resolve(),
		Err(MapError::UnknownProperty { .. })
	));
}

#[test]
fn option_accessor() {
	let none: Option<Field<Order, u64>> = None;
	assert!(none.resolve().unwrap().is_none());
	assert_eq!(Some(Order::ID).resolve().unwrap().unwrap().name(), "id");
}

#[test]
fn descriptor_is_its_own_accessor() {
	let property = Order::property("id").unwrap();
	assert!(std::ptr::eq(property.resolve().unwrap().unwrap(), property));
}
