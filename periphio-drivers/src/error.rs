//! Bus error to transfer error mapping

use periphio_core::{TransferError, TransferKind};
use periphio_hal::{Error, ErrorKind};

/// Transfer failure class for a bus fault
pub fn transfer_kind(kind: ErrorKind) -> TransferKind {
    match kind {
        ErrorKind::Timeout => TransferKind::Timeout,
        ErrorKind::Nack => TransferKind::Nack,
        ErrorKind::Overrun => TransferKind::Overrun,
        ErrorKind::Framing | ErrorKind::Parity | ErrorKind::Noise => TransferKind::Corrupted,
        ErrorKind::ArbitrationLost | ErrorKind::Bus => TransferKind::Bus,
        ErrorKind::Mode | ErrorKind::Other => TransferKind::Hardware,
    }
}

/// Convert a vendor bus error, keeping its raw code
pub fn transfer_error<E: Error>(error: &E) -> TransferError {
    TransferError::with_code(transfer_kind(error.kind()), error.code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use periphio_core::state::Degradation;

    #[derive(Debug)]
    struct VendorError(u32);

    impl Error for VendorError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::ArbitrationLost
        }

        fn code(&self) -> u32 {
            self.0
        }
    }

    #[test]
    fn test_line_errors_are_corrupted() {
        for kind in [ErrorKind::Framing, ErrorKind::Parity, ErrorKind::Noise] {
            assert_eq!(transfer_kind(kind), TransferKind::Corrupted);
            assert_eq!(
                transfer_kind(kind).degradation(),
                Some(Degradation::Runtime)
            );
        }
    }

    #[test]
    fn test_unclassified_needs_reinit() {
        assert_eq!(
            transfer_kind(ErrorKind::Other).degradation(),
            Some(Degradation::Hardware)
        );
        assert_eq!(
            transfer_kind(ErrorKind::Mode).degradation(),
            Some(Degradation::Hardware)
        );
    }

    #[test]
    fn test_vendor_code_is_kept() {
        let e = transfer_error(&VendorError(0x02));
        assert_eq!(e.kind, TransferKind::Bus);
        assert_eq!(e.code, 0x02);
    }
}
