use alloy_sol_types::sol;

sol! {
    /// Subset of the Gnosis Safe interface needed by the estimation paths.
    contract Safe {
        function execTransaction(
            address to,
            uint256 value,
            bytes data,
            uint8 operation,
            uint256 safeTxGas,
            uint256 baseGas,
            uint256 gasPrice,
            address gasToken,
            address refundReceiver,
            bytes signatures
        ) external returns (bool success);

        function approveHash(bytes32 hashToApprove) external;

        function getTransactionHash(
            address to,
            uint256 value,
            bytes data,
            uint8 operation,
            uint256 safeTxGas,
            uint256 baseGas,
            uint256 gasPrice,
            address gasToken,
            address refundReceiver,
            uint256 _nonce
        ) external view returns (bytes32);

        function nonce() external view returns (uint256);

        function getThreshold() external view returns (uint256);

        function VERSION() external view returns (string);
    }
}
