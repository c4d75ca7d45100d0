use alloy::sol;

// Read-only slice of the ERC-20 interface; `#[sol(rpc)]` generates a
// contract binding whose calls go through any alloy provider.
sol! {
    #[sol(rpc)]
    interface ERC20 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address owner) external view returns (uint256);
    }
}
