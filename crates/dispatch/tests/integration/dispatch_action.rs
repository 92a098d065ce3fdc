use std::collections::HashSet;

use izumi_dispatch::{ActionKind, Category, DispatchAction, DispatchError, Payload, Registry, SignalAction, payload};
use rstest::rstest;

use crate::common::{AOE_MAGIC, Act, FakePayloadKey, Fixture, HEALING, Items, Magic, PayloadKey, SUCKS, ULTIMATE};

#[test]
fn match_in_category() {
	let fx = Fixture::new();
	let thunder = fx.send(Magic::Thunder);

	assert!(thunder.is_exactly(Magic::Thunder).unwrap());
	assert!(!thunder.is_exactly(Magic::Flare).unwrap());
	assert_eq!(thunder.matches_category::<Magic>().unwrap(), Some(Magic::Thunder));
	assert!(thunder.in_category::<Magic>());
}

fn switch_test(action: &DispatchAction) -> u32 {
	if let Some(magic) = action.matches_category::<Magic>().unwrap() {
		match magic {
			Magic::Thunder => 1,
			_ => 2,
		}
	} else if action.is_exactly(Magic::Meteo).unwrap() {
		3
	} else if action.is_exactly(Items::XPotion).unwrap() {
		4
	} else if let Some(item) = action.matches_category::<Items>().unwrap() {
		match item {
			Items::Elixir => 5,
			_ => 6,
		}
	} else {
		7
	}
}

#[test]
fn switch_casing() {
	let fx = Fixture::new();
	assert_eq!(switch_test(&fx.send(Magic::Thunder)), 1);
	assert_eq!(switch_test(&fx.send(Magic::Meteo)), 2, "category arm wins over the exact arm");
	assert_eq!(switch_test(&fx.send(Items::XPotion)), 4, "exact arm wins over the later category arm");
	assert_eq!(switch_test(&fx.send(Items::Elixir)), 5);
	assert_eq!(switch_test(&fx.send(Items::Potion)), 6);
	assert_eq!(switch_test(&fx.send(Act::Jump)), 7);
}

#[test]
fn as_value_ignores_category() {
	let fx = Fixture::new();
	let fire = fx.send(Magic::Fire);

	assert_eq!(fire.as_value::<Magic>().unwrap(), Magic::Fire);
	assert_eq!(
		fire.as_value::<Items>().unwrap(),
		Items::Potion,
		"any underlying integer can be read as any category"
	);
	assert!(fire.has_value(Items::Potion).unwrap());
	assert!(!fire.is_exactly(Items::Potion).unwrap());
}

#[test]
fn as_value_outside_the_domain_fails() {
	let fx = Fixture::new();
	let poison = fx.send(Magic::Poison);
	assert!(matches!(
		poison.as_value::<Items>(),
		Err(DispatchError::Registry(izumi_dispatch::RegistryError::IndexNotFound { .. }))
	));
}

#[test]
fn does_not_match_across_categories() {
	let fx = Fixture::new();
	let fire = fx.send(Magic::Fire);
	let potion = fx.send(Items::Potion);

	assert_eq!(Magic::Fire.to_raw(), Items::Potion.to_raw());
	assert!(!fire.is_exactly(Items::Potion).unwrap());
	assert_eq!(fire.matches_category::<Items>().unwrap(), None);
	assert!(!potion.is_exactly(Magic::Fire).unwrap());
	assert_eq!(potion.matches_category::<Magic>().unwrap(), None);
}

#[rstest]
#[case::fire(Magic::Fire, &[], &[ULTIMATE, AOE_MAGIC, SUCKS])]
#[case::flare(Magic::Flare, &[ULTIMATE], &[AOE_MAGIC])]
#[case::meteo(Magic::Meteo, &[ULTIMATE, AOE_MAGIC], &[SUCKS])]
#[case::thunder(Magic::Thunder, &[AOE_MAGIC], &[ULTIMATE])]
#[case::poison(Magic::Poison, &[SUCKS], &[ULTIMATE])]
fn magic_flags(#[case] value: Magic, #[case] set: &[&str], #[case] unset: &[&str]) {
	let fx = Fixture::new();
	let action = fx.send(value);
	for flag in set {
		assert!(action.has_flag(flag), "{value:?} should carry {flag}");
	}
	for flag in unset {
		assert!(!action.has_flag(flag), "{value:?} should not carry {flag}");
	}
}

#[test]
fn flags_cross_categories() {
	let fx = Fixture::new();
	let potion = fx.send(Items::Potion);
	let elixir = fx.send(Items::Elixir);
	let flare = fx.send(Magic::Flare);

	assert!(!potion.has_flag(ULTIMATE));
	assert!(potion.has_flag(HEALING));
	assert!(elixir.has_flag(ULTIMATE));
	assert!(flare.has_flag(ULTIMATE));
	assert!(!flare.has_flag("NeverDeclared"));
}

#[test]
fn flag_list_is_shared_not_copied() {
	let fx = Fixture::new();
	let a = fx.send(Magic::Meteo);
	let b = fx.send(Magic::Meteo);
	assert_ne!(a.id(), b.id());
	assert!(std::ptr::eq(a.flags(), b.flags()));
}

#[test]
fn payload_unboxing() {
	let fx = Fixture::new();
	let fire = fx.dispatch(
		Magic::Fire,
		payload! {
			PayloadKey::HitStat => (true, false),
			PayloadKey::Comment => String::from("So hot"),
		},
	);

	assert!(fire.has_payload::<bool>(PayloadKey::HitStat).is_none(), "wrong type");
	assert_eq!(fire.has_payload::<(bool, bool)>(PayloadKey::HitStat), Some(&(true, false)));
	assert!(fire.has_payload::<i32>(PayloadKey::Comment).is_none(), "wrong type");
	assert!(fire.has_payload::<String>(PayloadKey::HitStat).is_none(), "wrong key");
	assert_eq!(
		fire.has_payload::<String>(PayloadKey::Comment).map(String::as_str),
		Some("So hot")
	);

	let (crit, weakness) = fire.get_payload::<(bool, bool)>(PayloadKey::HitStat, false).unwrap();
	assert!(crit);
	assert!(!weakness);

	assert!(matches!(
		fire.get_payload::<bool>(PayloadKey::HitStat, false),
		Err(DispatchError::PayloadTypeMismatch { .. })
	));
	assert!(matches!(
		fire.get_payload::<bool>(PayloadKey::HitStat, true),
		Err(DispatchError::PayloadTypeMismatch { .. })
	));

	let plain = fx.send(Magic::Fire);
	assert!(matches!(
		plain.get_payload::<bool>(PayloadKey::HitStat, false),
		Err(DispatchError::PayloadKeyMissing { .. })
	));
	assert!(!plain.get_payload::<bool>(PayloadKey::HitStat, true).unwrap());
}

#[test]
fn payload_keys_of_different_types_are_distinct() {
	let fx = Fixture::new();
	let fire = fx.dispatch(
		Magic::Fire,
		payload! {
			PayloadKey::Attacker => 1_i32,
			FakePayloadKey::Attacker => 555_i32,
		},
	);
	assert_eq!(fire.get_payload::<i32>(PayloadKey::Attacker, false).unwrap(), 1);
	assert_eq!(fire.get_payload::<i32>(FakePayloadKey::Attacker, false).unwrap(), 555);
	assert!(fire.has_payload::<i32>(FakePayloadKey::Crit).is_none());
}

#[test]
fn optional_payload() {
	let fx = Fixture::new();
	let fire = fx.dispatch(Magic::Fire, payload! { PayloadKey::Crit => true });
	let thunder = fx.dispatch(
		Magic::Thunder,
		payload! {
			PayloadKey::Crit => true,
			PayloadKey::All => true,
		},
	);

	assert!(matches!(
		fire.get_payload2::<bool, bool>(PayloadKey::Crit, PayloadKey::All, (false, false)),
		Err(DispatchError::PayloadKeyMissing { .. })
	));
	assert_eq!(
		fire.get_payload2::<bool, bool>(PayloadKey::Crit, PayloadKey::All, (false, true))
			.unwrap(),
		(true, false),
		"an optional missing key comes back as the default"
	);
	assert_eq!(
		thunder
			.get_payload2::<bool, bool>(PayloadKey::Crit, PayloadKey::All, (true, true))
			.unwrap(),
		(true, true),
		"optionals do not touch keys that exist"
	);
}

#[test]
fn multi_key_payload_fails_per_key() {
	let fx = Fixture::new();
	let action = fx.dispatch(
		Items::Elixir,
		payload! {
			PayloadKey::Attacker => 3_u8,
			PayloadKey::Target => String::from("party"),
			PayloadKey::Crit => false,
		},
	);

	let (attacker, target, crit, thrown) = action
		.get_payload4::<u8, String, bool, i64>(
			PayloadKey::Attacker,
			PayloadKey::Target,
			PayloadKey::Crit,
			PayloadKey::ThrownItem,
			(false, false, false, true),
		)
		.unwrap();
	assert_eq!((attacker, target.as_str(), crit, thrown), (3, "party", false, 0));

	assert!(matches!(
		action.get_payload3::<u8, i32, bool>(PayloadKey::Attacker, PayloadKey::Target, PayloadKey::Crit, (true, true, true)),
		Err(DispatchError::PayloadTypeMismatch { .. })
	));
}

#[test]
fn duplicate_preserves_id_and_shares_payload() {
	let fx = Fixture::new();
	let original = fx.dispatch(Magic::Holy, payload! { PayloadKey::Comment => String::from("shine") });
	let copy = original.duplicate();

	assert_eq!(copy.id(), original.id());
	assert_eq!(copy, original);
	assert!(std::ptr::eq(copy.payload(), original.payload()));
	assert!(copy.is_exactly(Magic::Holy).unwrap());
}

#[test]
fn create_mints_increasing_ids() {
	let fx = Fixture::new();
	let a = DispatchAction::create(fx.registry(), Magic::Ice, Payload::new()).unwrap();
	let b = DispatchAction::create(fx.registry(), Magic::Ice, Payload::new()).unwrap();
	assert!(b.id() > a.id());
	assert_ne!(a, b);
}

#[test]
fn actions_from_separate_registries_stay_distinct() {
	let a = DispatchAction::create(&Registry::new(), Magic::Fire, Payload::new()).unwrap();
	let b = DispatchAction::create(&Registry::new(), Items::Elixir, Payload::new()).unwrap();
	assert_ne!(a.id(), b.id());
	assert_ne!(a, b);

	let mut set = HashSet::new();
	assert!(set.insert(a.clone()));
	assert!(set.insert(b));
	assert!(!set.insert(a.duplicate()));
	assert_eq!(set.len(), 2);
}

#[test]
fn redispatching_a_created_action_keeps_its_id() {
	let fx = Fixture::new();
	let created = fx.dispatcher.create(Items::Ether, Payload::new()).unwrap();
	fx.dispatcher.dispatch_action(&created).unwrap();
	fx.dispatcher.dispatch_action(&created).unwrap();
	let received = fx.send(Items::Ether);
	assert!(received.id() > created.id());
}

#[test]
fn display_names_category_and_value() {
	let fx = Fixture::new();
	let meteo = fx.send(Magic::Meteo);
	let text = meteo.to_string();
	assert!(text.starts_with("Action Category : "));
	assert!(text.contains("Magic"));
	assert!(text.ends_with("Type : Meteo"));
	assert_eq!(meteo.value_name().unwrap(), "Meteo");
}

#[test]
fn changed_signal_is_tagged() {
	let fx = Fixture::new();
	let signal = fx
		.dispatcher
		.signal_changed(SignalAction::ExternalDataChanged, Payload::new())
		.unwrap();
	assert_eq!(signal.kind(), ActionKind::ChangedSignal);
	assert!(signal.is_changed_signal());
	assert!(signal.is_exactly(SignalAction::ExternalDataChanged).unwrap());
	assert!(!fx.send(Act::Jump).is_changed_signal());
}
