izumi_registry::category! {
	/// Special-purpose actions.
	pub enum SignalAction {
		/// Asks every store to refresh the part of its data that lives outside the
		/// world. Stores normally react to tracked changes; this acts as the manual
		/// "changed" for data nobody tracks.
		ExternalDataChanged,
	}
}
