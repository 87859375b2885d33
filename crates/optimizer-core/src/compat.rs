//! Hazmat and route compatibility of an order subset.

use crate::table::Mask;
use optimizer_types::Order;

/// Returns whether every order in `mask` can share the truck.
///
/// Members must be either all hazmat or all non-hazmat, and must share
/// one origin and one destination. Places are compared after trimming
/// surrounding whitespace and ignoring case. The empty subset is
/// compatible.
pub fn is_compatible(mask: Mask, orders: &[Order]) -> bool {
	let mut has_hazmat = false;
	let mut has_non_hazmat = false;
	let mut route: Option<(&str, &str)> = None;

	for (i, order) in orders.iter().enumerate() {
		if mask & (1 << i) == 0 {
			continue;
		}

		if order.is_hazmat {
			has_hazmat = true;
		} else {
			has_non_hazmat = true;
		}
		if has_hazmat && has_non_hazmat {
			return false;
		}

		match route {
			None => route = Some((order.origin.as_str(), order.destination.as_str())),
			Some((origin, destination)) => {
				if !same_place(origin, &order.origin)
					|| !same_place(destination, &order.destination)
				{
					return false;
				}
			}
		}
	}

	true
}

/// Case-insensitive comparison of trimmed place names.
///
/// Characters are compared one to one, so multi-character case mappings
/// such as `ß` and `SS` do not match.
pub fn same_place(a: &str, b: &str) -> bool {
	let mut a = a.trim().chars();
	let mut b = b.trim().chars();

	loop {
		match (a.next(), b.next()) {
			(None, None) => return true,
			(Some(x), Some(y)) if fold_eq(x, y) => {}
			_ => return false,
		}
	}
}

/// Two characters match if they agree after lowercasing or after
/// uppercasing, which puts `Σ`, `σ` and `ς` in one class.
fn fold_eq(x: char, y: char) -> bool {
	x == y
		|| x.to_lowercase().eq(y.to_lowercase())
		|| x.to_uppercase().eq(y.to_uppercase())
}
